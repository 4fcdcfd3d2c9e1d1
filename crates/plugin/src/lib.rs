//! vite-info plugin - build metadata as a virtual module.
//!
//! Application code imports `virtual:vite-info` to read the build time, the
//! registered plugin names and the host's mode, command and root. In dev mode
//! the plugin also stamps `.js`/`.ts` sources and logs file changes.

mod observer;
mod plugin;
mod reporter;
mod state;
pub mod timestamp;
mod transform;
pub mod virtual_module;

pub use plugin::{PLUGIN_NAME, ViteInfoPlugin};
pub use reporter::Reporter;
pub use state::PluginState;
pub use transform::MARKER_PREFIX;
pub use virtual_module::{RESOLVED_VIRTUAL_MODULE_ID, VIRTUAL_MODULE_ID};
