//! User and resolved host configuration.

use serde::{Deserialize, Serialize};

/// Config object handed to the `config` hook before resolution.
///
/// Plugins may fill in fields; `None` means "let the host decide".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Project root.
    pub root: Option<String>,

    /// Mode override.
    pub mode: Option<String>,
}

/// Final host configuration handed to the `configResolved` hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Names of every registered plugin, in registration order.
    pub plugins: Vec<String>,

    /// Resolved mode.
    pub mode: String,

    /// Active command as reported by the host.
    pub command: String,

    /// Absolute project root.
    pub root: String,
}

impl ResolvedConfig {
    /// Creates a resolved config.
    pub fn new(
        plugins: Vec<String>,
        mode: impl Into<String>,
        command: impl Into<String>,
        root: impl Into<String>,
    ) -> Self {
        Self {
            plugins,
            mode: mode.into(),
            command: command.into(),
            root: root.into(),
        }
    }
}
