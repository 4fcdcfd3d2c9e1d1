//! Build context captured from the host's configuration hooks.

use vite_info_core::{Command, ResolvedConfig};

use crate::timestamp;

/// Build context shared by every hook of one plugin instance.
///
/// `is_dev` is set by the `config` hook; the descriptors are set by
/// `configResolved`. Readers that run before either hook see defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginState {
    is_dev: bool,
    plugin_names: Vec<String>,
    vite_mode: String,
    vite_command: String,
    vite_config_root: String,
    build_time: String,
}

impl PluginState {
    /// Creates an empty state whose build time is fixed to now.
    pub fn new() -> Self {
        Self::with_build_time(timestamp::now_iso())
    }

    /// Creates an empty state with an explicit build time.
    pub fn with_build_time(build_time: impl Into<String>) -> Self {
        Self {
            is_dev: false,
            plugin_names: Vec::new(),
            vite_mode: String::new(),
            vite_command: String::new(),
            vite_config_root: String::new(),
            build_time: build_time.into(),
        }
    }

    /// Records the host command. Unrecognized commands leave `is_dev` as is.
    pub fn capture_command(&mut self, command: &str) {
        if let Ok(command) = command.parse::<Command>() {
            self.is_dev = command == Command::Serve;
        }
    }

    /// Records the resolved host descriptors verbatim.
    pub fn capture_resolved_config(&mut self, config: &ResolvedConfig) {
        self.plugin_names = config.plugins.clone();
        self.vite_mode = config.mode.clone();
        self.vite_command = config.command.clone();
        self.vite_config_root = config.root.clone();
    }

    pub fn is_dev(&self) -> bool {
        self.is_dev
    }

    pub fn plugin_names(&self) -> &[String] {
        &self.plugin_names
    }

    pub fn vite_mode(&self) -> &str {
        &self.vite_mode
    }

    pub fn vite_command(&self) -> &str {
        &self.vite_command
    }

    pub fn vite_config_root(&self) -> &str {
        &self.vite_config_root
    }

    /// Process start time; never changes for the lifetime of the state.
    pub fn build_time(&self) -> &str {
        &self.build_time
    }
}

impl Default for PluginState {
    fn default() -> Self {
        Self::new()
    }
}
