//! Dev-only source annotation.

use crate::state::PluginState;
use crate::timestamp;

/// Prefix of the comment line appended to transformed sources.
pub const MARKER_PREFIX: &str = "// [vite-info] transformed at";

/// Appends a timestamp comment to `.js`/`.ts` sources in dev mode.
///
/// Already-annotated code gets another marker line; markers are never merged.
pub fn annotate(state: &PluginState, code: &str, id: &str) -> Option<String> {
    if !state.is_dev() || !is_script(id) {
        return None;
    }

    Some(format!("{}\n{} {}", code, MARKER_PREFIX, timestamp::now_iso()))
}

/// Case-sensitive suffix match; query strings are not stripped.
fn is_script(id: &str) -> bool {
    id.ends_with(".js") || id.ends_with(".ts")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn dev_state() -> PluginState {
        let mut state = PluginState::with_build_time("t");
        state.capture_command("serve");
        state
    }

    fn marker_timestamp(line: &str) -> &str {
        line.strip_prefix(MARKER_PREFIX).unwrap().trim_start()
    }

    #[test]
    fn test_build_mode_is_noop() {
        let mut state = PluginState::with_build_time("t");
        state.capture_command("build");
        assert_eq!(annotate(&state, "const x = 1;", "foo.ts"), None);
        assert_eq!(annotate(&state, "const x = 1;", "foo.js"), None);
    }

    #[test]
    fn test_appends_single_marker_line() {
        let code = annotate(&dev_state(), "const x = 1;", "foo.ts").unwrap();
        let lines: Vec<&str> = code.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "const x = 1;");
        assert!(DateTime::parse_from_rfc3339(marker_timestamp(lines[1])).is_ok());
    }

    #[test]
    fn test_reannotating_appends_second_marker() {
        let state = dev_state();
        let once = annotate(&state, "const x = 1;", "foo.ts").unwrap();
        let twice = annotate(&state, &once, "foo.ts").unwrap();
        let lines: Vec<&str> = twice.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(twice.starts_with(&once));
        assert!(lines[1].starts_with(MARKER_PREFIX));
        assert!(lines[2].starts_with(MARKER_PREFIX));
    }

    #[test]
    fn test_only_script_suffixes_match() {
        let state = dev_state();
        assert!(annotate(&state, "", "/src/main.js").is_some());
        assert!(annotate(&state, "", "/src/main.ts").is_some());

        for id in ["/src/App.vue", "/src/main.tsx", "/src/main.TS", "/src/main.ts?v=1", "/style.css"] {
            assert_eq!(annotate(&state, "", id), None, "{id} should be skipped");
        }
    }
}
