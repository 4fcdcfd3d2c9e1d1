//! The `Plugin` implementation wiring state, module provider and reporters.

use std::io::{Stdout, Write};

use vite_info_core::{
    ConfigEnv, HmrContext, OutputBundle, OutputOptions, Plugin, ResolvedConfig, UserConfig,
    WatchChange,
};

use crate::observer;
use crate::reporter::Reporter;
use crate::state::PluginState;
use crate::transform;
use crate::virtual_module;

/// Name the plugin registers under.
pub const PLUGIN_NAME: &str = "vite-plugin-vite-info";

/// Exposes build metadata as `virtual:vite-info` and reports lifecycle events.
pub struct ViteInfoPlugin<W: Write = Stdout> {
    state: PluginState,
    reporter: Reporter<W>,
}

impl ViteInfoPlugin<Stdout> {
    /// Creates a plugin reporting to stdout, with its build time fixed to now.
    pub fn new() -> Self {
        Self::with_reporter(PluginState::new(), Reporter::stdout())
    }
}

impl Default for ViteInfoPlugin<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ViteInfoPlugin<W> {
    /// Creates a plugin from explicit state and output.
    pub fn with_reporter(state: PluginState, reporter: Reporter<W>) -> Self {
        Self { state, reporter }
    }

    pub fn state(&self) -> &PluginState {
        &self.state
    }

    pub fn reporter(&self) -> &Reporter<W> {
        &self.reporter
    }

    pub fn into_reporter(self) -> Reporter<W> {
        self.reporter
    }
}

impl<W: Write> Plugin for ViteInfoPlugin<W> {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn config(&mut self, _config: &mut UserConfig, env: &ConfigEnv) {
        self.state.capture_command(&env.command);
    }

    fn config_resolved(&mut self, config: &ResolvedConfig) {
        self.state.capture_resolved_config(config);
    }

    fn resolve_id(&self, source: &str) -> Option<String> {
        virtual_module::resolve(source)
    }

    fn load(&self, id: &str) -> Option<String> {
        virtual_module::load(&self.state, id)
    }

    fn transform(&self, code: &str, id: &str) -> Option<String> {
        transform::annotate(&self.state, code, id)
    }

    fn watch_change(&mut self, id: &str, change: &WatchChange) {
        observer::watch_change(&self.state, &mut self.reporter, id, change);
    }

    fn build_start(&mut self) {
        self.reporter
            .build_started(self.state.vite_command(), self.state.vite_mode());
    }

    fn build_end(&mut self) {
        self.reporter.build_finished();
    }

    fn generate_bundle(&mut self, options: &OutputOptions, bundle: &OutputBundle) {
        self.reporter
            .bundle_generated(&options.dir, &bundle.file_names());
    }

    fn close_bundle(&mut self) {
        self.reporter.bundle_closed();
    }

    fn handle_hot_update(&mut self, ctx: &HmrContext) {
        observer::hot_update(&mut self.reporter, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vite_info_core::{ChangeEvent, Command, OutputFile};

    use crate::virtual_module::{RESOLVED_VIRTUAL_MODULE_ID, VIRTUAL_MODULE_ID};

    fn plugin() -> ViteInfoPlugin<Vec<u8>> {
        ViteInfoPlugin::with_reporter(
            PluginState::with_build_time("2026-10-16T09:30:00.000Z"),
            Reporter::new(Vec::new()),
        )
    }

    fn output(plugin: &ViteInfoPlugin<Vec<u8>>) -> String {
        String::from_utf8(plugin.reporter().get_ref().clone()).unwrap()
    }

    fn configure(plugin: &mut ViteInfoPlugin<Vec<u8>>, command: Command) {
        plugin.config(&mut UserConfig::default(), &ConfigEnv::new(command, "development"));
        plugin.config_resolved(&ResolvedConfig::new(
            vec!["a".to_string(), "b".to_string()],
            "development",
            command.as_str(),
            "/proj",
        ));
    }

    #[test]
    fn test_name() {
        assert_eq!(plugin().name(), "vite-plugin-vite-info");
    }

    #[test]
    fn test_resolve_then_load() {
        let mut plugin = plugin();
        configure(&mut plugin, Command::Serve);

        let id = plugin.resolve_id(VIRTUAL_MODULE_ID).unwrap();
        assert_eq!(id, RESOLVED_VIRTUAL_MODULE_ID);

        let source = plugin.load(&id).unwrap();
        assert!(source.contains("['a','b']"));
        assert_eq!(plugin.resolve_id("./main.ts"), None);
        assert_eq!(plugin.load("/proj/main.ts"), None);
    }

    #[test]
    fn test_transform_follows_command() {
        let mut plugin = plugin();
        configure(&mut plugin, Command::Build);
        assert_eq!(plugin.transform("const x = 1;", "foo.ts"), None);

        configure(&mut plugin, Command::Serve);
        assert!(plugin.transform("const x = 1;", "foo.ts").is_some());
    }

    #[test]
    fn test_watch_change_gated_on_dev() {
        let mut plugin = plugin();
        configure(&mut plugin, Command::Build);
        plugin.watch_change("/proj/a.ts", &WatchChange::new(ChangeEvent::Update));
        assert!(output(&plugin).is_empty());

        configure(&mut plugin, Command::Serve);
        plugin.watch_change("/proj/a.ts", &WatchChange::new(ChangeEvent::Update));
        let output = output(&plugin);
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("update /proj/a.ts"));
    }

    #[test]
    fn test_build_lifecycle_lines() {
        let mut plugin = plugin();
        configure(&mut plugin, Command::Build);

        let mut bundle = OutputBundle::new();
        bundle.insert(
            "assets/index-00000000.js",
            OutputFile::Asset {
                name: "index".to_string(),
                source: String::new(),
            },
        );

        plugin.build_start();
        plugin.build_end();
        plugin.generate_bundle(&OutputOptions::default(), &bundle);
        plugin.close_bundle();

        assert_eq!(
            output(&plugin),
            "[vite-info] build started (build, mode development)\n\
             [vite-info] build finished\n\
             [vite-info] generated 1 file(s) in dist\n\
             \x20 - assets/index-00000000.js\n\
             [vite-info] bundle closed\n"
        );
    }
}
