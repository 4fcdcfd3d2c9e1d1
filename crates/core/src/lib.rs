//! vite-info core - hook protocol types shared by the plugin and its hosts.

mod bundle;
mod command;
mod config;
mod error;
mod hook;
mod watch;

pub use bundle::{OutputBundle, OutputFile, OutputOptions};
pub use command::{Command, ConfigEnv};
pub use config::{ResolvedConfig, UserConfig};
pub use error::{CoreError, Result};
pub use hook::Plugin;
pub use watch::{ChangeEvent, HmrContext, WatchChange};
