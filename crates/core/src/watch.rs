//! File-change and hot-update notifications.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kind of filesystem change reported to `watchChange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeEvent {
    Create,
    Update,
    Delete,
}

impl ChangeEvent {
    /// Returns the wire name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeEvent::Create => "create",
            ChangeEvent::Update => "update",
            ChangeEvent::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeEvent {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(ChangeEvent::Create),
            "update" => Ok(ChangeEvent::Update),
            "delete" => Ok(ChangeEvent::Delete),
            other => Err(CoreError::UnknownChangeEvent(other.to_string())),
        }
    }
}

/// Second argument of the `watchChange` hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchChange {
    pub event: ChangeEvent,
}

impl WatchChange {
    pub fn new(event: ChangeEvent) -> Self {
        Self { event }
    }
}

/// Context passed to the `handleHotUpdate` hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmrContext {
    /// Changed file.
    pub file: String,

    /// Milliseconds since the Unix epoch at which the change was seen.
    pub timestamp: i64,

    /// Ids of graph modules affected by the change.
    pub modules: Vec<String>,
}
