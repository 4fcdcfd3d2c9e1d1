//! Output bundle passed to the `generateBundle` hook.

use serde::{Deserialize, Serialize};

/// Output options for a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Output directory, relative to the project root.
    pub dir: String,

    /// Module format of emitted chunks.
    pub format: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            dir: "dist".to_string(),
            format: "es".to_string(),
        }
    }
}

/// A single emitted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputFile {
    /// A JavaScript chunk built from one entry.
    Chunk {
        name: String,
        code: String,
        modules: Vec<String>,
    },

    /// A non-code asset.
    Asset { name: String, source: String },
}

impl OutputFile {
    /// Returns the file contents.
    pub fn contents(&self) -> &str {
        match self {
            OutputFile::Chunk { code, .. } => code,
            OutputFile::Asset { source, .. } => source,
        }
    }
}

/// Files emitted by a build, keyed by file name in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputBundle {
    files: Vec<(String, OutputFile)>,
}

impl OutputBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a file, replacing any previous file with the same name.
    pub fn insert(&mut self, file_name: impl Into<String>, file: OutputFile) {
        let file_name = file_name.into();
        match self.files.iter_mut().find(|(name, _)| *name == file_name) {
            Some(slot) => slot.1 = file,
            None => self.files.push((file_name, file)),
        }
    }

    /// Gets a file by name.
    pub fn get(&self, file_name: &str) -> Option<&OutputFile> {
        self.files
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, file)| file)
    }

    /// Returns all file names in emission order.
    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Iterates over `(file name, file)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OutputFile)> {
        self.files.iter().map(|(name, file)| (name.as_str(), file))
    }

    /// Returns the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
