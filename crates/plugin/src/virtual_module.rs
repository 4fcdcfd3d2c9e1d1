//! The `virtual:vite-info` module: resolution, loading and source generation.

use crate::state::PluginState;

/// Import specifier application code uses.
pub const VIRTUAL_MODULE_ID: &str = "virtual:vite-info";

/// Resolved id. The NUL prefix marks it as "not a filesystem path" so no user
/// file can ever collide with it.
pub const RESOLVED_VIRTUAL_MODULE_ID: &str = "\0virtual:vite-info";

/// Resolves the virtual module specifier; every other source defers.
pub fn resolve(source: &str) -> Option<String> {
    (source == VIRTUAL_MODULE_ID).then(|| RESOLVED_VIRTUAL_MODULE_ID.to_string())
}

/// Loads the virtual module, regenerating it from the current state.
pub fn load(state: &PluginState, id: &str) -> Option<String> {
    (id == RESOLVED_VIRTUAL_MODULE_ID).then(|| render(state))
}

/// Renders the module body as one export statement per line.
pub fn render(state: &PluginState) -> String {
    let plugin_names = state
        .plugin_names()
        .iter()
        .map(|name| quote(name))
        .collect::<Vec<_>>()
        .join(",");

    let lines = [
        "export function getTimestamp() { return new Date().toISOString(); }".to_string(),
        format!("export const buildTime = {};", quote(state.build_time())),
        format!("export const pluginNames = [{}];", plugin_names),
        format!("export const viteMode = {};", quote(state.vite_mode())),
        format!("export const viteCommand = {};", quote(state.vite_command())),
        format!(
            "export const viteConfigRoot = {};",
            quote(state.vite_config_root())
        ),
    ];

    let mut source = lines.join("\n");
    source.push('\n');
    source
}

/// Renders a single-quoted JavaScript string literal.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\x00"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vite_info_core::ResolvedConfig;

    fn configured_state() -> PluginState {
        let mut state = PluginState::with_build_time("2026-10-16T09:30:00.000Z");
        state.capture_command("serve");
        state.capture_resolved_config(&ResolvedConfig::new(
            vec!["a".to_string(), "b".to_string()],
            "development",
            "serve",
            "/proj",
        ));
        state
    }

    #[test]
    fn test_resolve_other_sources_defer() {
        for source in [
            "./main.ts",
            "virtual:vite-info2",
            "virtual:vite-info?raw",
            "/virtual:vite-info",
            "Virtual:vite-info",
            RESOLVED_VIRTUAL_MODULE_ID,
            "",
        ] {
            assert_eq!(resolve(source), None, "{source:?} should defer");
        }
    }

    #[test]
    fn test_resolve_is_stable_and_not_a_path() {
        let first = resolve(VIRTUAL_MODULE_ID).unwrap();
        let second = resolve(VIRTUAL_MODULE_ID).unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with('\0'));
        assert_ne!(first, VIRTUAL_MODULE_ID);
    }

    #[test]
    fn test_load_other_ids_defer() {
        let state = configured_state();
        assert_eq!(load(&state, VIRTUAL_MODULE_ID), None);
        assert_eq!(load(&state, "/proj/src/main.ts"), None);
    }

    #[test]
    fn test_load_renders_configured_values() {
        let state = configured_state();
        let source = load(&state, RESOLVED_VIRTUAL_MODULE_ID).unwrap();

        assert!(source.contains("export const pluginNames = ['a','b'];"));
        assert!(source.contains("export const viteMode = 'development';"));
        assert!(source.contains("export const viteCommand = 'serve';"));
        assert!(source.contains("export const viteConfigRoot = '/proj';"));
        assert!(source.contains("export const buildTime = '2026-10-16T09:30:00.000Z';"));
    }

    #[test]
    fn test_get_timestamp_is_live_accessor() {
        let source = render(&configured_state());
        assert!(source.contains("export function getTimestamp() { return new Date().toISOString(); }"));
    }

    #[test]
    fn test_load_before_config_resolved_yields_defaults() {
        let state = PluginState::with_build_time("2026-10-16T09:30:00.000Z");
        let source = load(&state, RESOLVED_VIRTUAL_MODULE_ID).unwrap();

        assert!(source.contains("export const pluginNames = [];"));
        assert!(source.contains("export const viteMode = '';"));
        assert!(source.contains("export const viteCommand = '';"));
        assert!(source.contains("export const viteConfigRoot = '';"));
    }

    #[test]
    fn test_load_regenerates_from_current_state() {
        let mut state = configured_state();
        let before = load(&state, RESOLVED_VIRTUAL_MODULE_ID).unwrap();

        state.capture_resolved_config(&ResolvedConfig::new(vec![], "test", "serve", "/other"));
        let after = load(&state, RESOLVED_VIRTUAL_MODULE_ID).unwrap();

        assert_ne!(before, after);
        assert!(after.contains("export const viteConfigRoot = '/other';"));
    }

    #[test]
    fn test_build_time_identical_across_loads() {
        let state = PluginState::new();
        let first = load(&state, RESOLVED_VIRTUAL_MODULE_ID).unwrap();
        let second = load(&state, RESOLVED_VIRTUAL_MODULE_ID).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("it's"), r"'it\'s'");
        assert_eq!(quote(r"C:\proj"), r"'C:\\proj'");
        assert_eq!(quote("a\nb"), r"'a\nb'");
        assert_eq!(quote("\0vite"), r"'\x00vite'");
    }

    #[test]
    fn test_render_snapshot() {
        insta::assert_snapshot!(render(&configured_state()), @r"
        export function getTimestamp() { return new Date().toISOString(); }
        export const buildTime = '2026-10-16T09:30:00.000Z';
        export const pluginNames = ['a','b'];
        export const viteMode = 'development';
        export const viteCommand = 'serve';
        export const viteConfigRoot = '/proj';
        ");
    }
}
