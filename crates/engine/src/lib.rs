//! vite-info engine - a minimal bundler host for exercising plugins.
//!
//! The engine owns the module graph and invokes plugin hooks in the same
//! partial order a real dev server or bundler does, so plugins relying on
//! that order can be tested without one.

mod bundle;
mod config;
mod engine;
mod error;
mod graph;
mod imports;

pub use bundle::{chunk_file_name, write_bundle};
pub use config::{CONFIG_FILE_NAME, EngineConfig};
pub use engine::{BuildOutput, Engine, Phase};
pub use error::{EngineError, Result};
pub use graph::{ModuleGraph, ModuleNode};
pub use imports::scan_imports;
