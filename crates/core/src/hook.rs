//! The plugin hook protocol.
//!
//! A host invokes these methods in a fixed partial order:
//! `config` → `configResolved` → `buildStart` → interleaved
//! `resolveId`/`load`/`transform` → (`buildEnd` → `generateBundle` →
//! `closeBundle` for builds) or (`watchChange`/`handleHotUpdate` repeatedly
//! for dev sessions). Plugins rely on that order instead of checking it.

use crate::bundle::{OutputBundle, OutputOptions};
use crate::command::ConfigEnv;
use crate::config::{ResolvedConfig, UserConfig};
use crate::watch::{HmrContext, WatchChange};

/// A bundler plugin. Every hook except [`Plugin::name`] defaults to a no-op.
pub trait Plugin {
    /// Unique plugin name, reported to other plugins via `configResolved`.
    fn name(&self) -> &str;

    /// Called first, before the host resolves its configuration.
    fn config(&mut self, _config: &mut UserConfig, _env: &ConfigEnv) {}

    /// Called once the host configuration is final.
    fn config_resolved(&mut self, _config: &ResolvedConfig) {}

    /// Resolves an import specifier. `None` defers to other resolvers.
    fn resolve_id(&self, _source: &str) -> Option<String> {
        None
    }

    /// Loads a resolved id. `None` defers to other loaders.
    fn load(&self, _id: &str) -> Option<String> {
        None
    }

    /// Transforms loaded source. `None` leaves the code unmodified.
    fn transform(&self, _code: &str, _id: &str) -> Option<String> {
        None
    }

    /// A watched file changed.
    fn watch_change(&mut self, _id: &str, _change: &WatchChange) {}

    /// A build or dev session started.
    fn build_start(&mut self) {}

    /// Module graph construction finished. Build command only.
    fn build_end(&mut self) {}

    /// Output files are about to be written. Build command only.
    fn generate_bundle(&mut self, _options: &OutputOptions, _bundle: &OutputBundle) {}

    /// The build finished successfully. Build command only.
    fn close_bundle(&mut self) {}

    /// A module replacement is about to be sent to clients.
    fn handle_hot_update(&mut self, _ctx: &HmrContext) {}
}
