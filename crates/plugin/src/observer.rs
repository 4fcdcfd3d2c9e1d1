//! File-change and hot-update logging for dev sessions.

use std::io::Write;

use vite_info_core::{HmrContext, WatchChange};

use crate::reporter::Reporter;
use crate::state::PluginState;
use crate::timestamp;

/// Logs a watched file change. Silent outside dev mode.
pub fn watch_change<W: Write>(
    state: &PluginState,
    reporter: &mut Reporter<W>,
    id: &str,
    change: &WatchChange,
) {
    if !state.is_dev() {
        return;
    }

    reporter.file_changed(&timestamp::now_iso(), change.event.as_str(), id);
}

/// Logs a module replacement. Hosts only send these during dev sessions, so
/// there is no mode check here.
pub fn hot_update<W: Write>(reporter: &mut Reporter<W>, ctx: &HmrContext) {
    reporter.hot_update(&ctx.file);
}
