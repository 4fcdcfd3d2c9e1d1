//! Host configuration loaded from `vite-info.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Config file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "vite-info.json";

/// Host configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Project root. Relative roots are resolved against the config file.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Mode override; the command's default mode applies when unset.
    #[serde(default)]
    pub mode: Option<String>,

    /// Entry files, relative to the root.
    #[serde(default = "default_input")]
    pub input: Vec<String>,

    /// Output directory, relative to the root.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_input() -> Vec<String> {
    vec!["index.js".to_string()]
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            mode: None,
            input: default_input(),
            out_dir: default_out_dir(),
        }
    }
}

impl EngineConfig {
    /// Creates a default config rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Loads `vite-info.json` from `root` if present, otherwise defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);

        if !path.exists() {
            return Ok(Self::new(root));
        }

        let mut config = Self::from_file(&path)?;
        config.root = root.join(&config.root);
        Ok(config)
    }

    /// Loads a config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
        Self::from_json(&content)
    }

    /// Parses a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Converts the config to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Sets the mode.
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Sets the entry files.
    pub fn with_input(mut self, input: Vec<String>) -> Self {
        self.input = input;
        self
    }

    /// Returns the absolute-or-root-relative output directory.
    pub fn out_path(&self) -> PathBuf {
        self.root.join(&self.out_dir)
    }
}
