//! Host commands and the environment handed to the `config` hook.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The command the host is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Interactive dev server with live reload.
    Serve,

    /// Static production bundle.
    Build,
}

impl Command {
    /// Returns the wire name of the command.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Serve => "serve",
            Command::Build => "build",
        }
    }

    /// Returns the mode a host picks when none is configured.
    pub fn default_mode(&self) -> &'static str {
        match self {
            Command::Serve => "development",
            Command::Build => "production",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serve" => Ok(Command::Serve),
            "build" => Ok(Command::Build),
            other => Err(CoreError::UnknownCommand(other.to_string())),
        }
    }
}

/// Environment passed alongside the user config to the `config` hook.
///
/// `command` is kept as the raw host string so plugins see exactly what the
/// host supplied, including values they do not recognize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEnv {
    /// Active host command (`"serve"` or `"build"` for well-behaved hosts).
    pub command: String,

    /// Active mode name.
    pub mode: String,
}

impl ConfigEnv {
    /// Creates an environment for a known command.
    pub fn new(command: Command, mode: impl Into<String>) -> Self {
        Self {
            command: command.as_str().to_string(),
            mode: mode.into(),
        }
    }
}
