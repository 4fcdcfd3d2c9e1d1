//! Host harness that drives plugin hooks in the host's lifecycle order.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use tracing::debug;
use vite_info_core::{
    ChangeEvent, Command, ConfigEnv, HmrContext, OutputBundle, OutputFile, OutputOptions, Plugin,
    ResolvedConfig, UserConfig, WatchChange,
};

use crate::bundle::chunk_file_name;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::graph::{self, ModuleGraph, ModuleNode};
use crate::imports::scan_imports;

/// Lifecycle phase of an engine session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No hook has run yet.
    Uninitialized,

    /// `config` ran on every plugin.
    ConfigCaptured,

    /// `configResolved` ran on every plugin.
    FullyConfigured,

    /// Dev session after `buildStart`.
    Serving,

    /// Build after `buildStart`, before `closeBundle`.
    Building,

    /// Session closed.
    Finished,
}

/// Result of a build.
#[derive(Debug)]
pub struct BuildOutput {
    /// Emitted files.
    pub bundle: OutputBundle,

    /// Number of modules in the graph.
    pub module_count: usize,

    /// Total build time in milliseconds.
    pub duration_ms: u64,
}

/// Owns registered plugins and the module graph of one session.
pub struct Engine {
    config: EngineConfig,
    plugins: Vec<Box<dyn Plugin>>,
    phase: Phase,
    command: Option<Command>,
    resolved: Option<ResolvedConfig>,
    graph: ModuleGraph,
}

impl Engine {
    /// Creates an engine with no plugins. A relative root is made absolute.
    pub fn new(mut config: EngineConfig) -> Self {
        if let Ok(root) = std::path::absolute(&config.root) {
            config.root = graph::normalize(&root);
        }

        Self {
            config,
            plugins: Vec::new(),
            phase: Phase::Uninitialized,
            command: None,
            resolved: None,
            graph: ModuleGraph::new(),
        }
    }

    /// Registers a plugin. Plugins run in registration order.
    pub fn with_plugin(mut self, plugin: Box<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The config handed to `configResolved`, once it ran.
    pub fn resolved_config(&self) -> Option<&ResolvedConfig> {
        self.resolved.as_ref()
    }

    pub fn graph(&self) -> &ModuleGraph {
        &self.graph
    }

    /// Runs the `config` hook on every plugin.
    pub fn capture_config(&mut self, command: Command) -> Result<()> {
        self.expect_phase(Phase::Uninitialized)?;

        let mode = self
            .config
            .mode
            .clone()
            .unwrap_or_else(|| command.default_mode().to_string());
        let env = ConfigEnv::new(command, mode);
        let mut user_config = UserConfig {
            root: None,
            mode: self.config.mode.clone(),
        };

        for plugin in &mut self.plugins {
            debug!(plugin = plugin.name(), hook = "config", command = %command);
            plugin.config(&mut user_config, &env);
        }

        if let Some(root) = user_config.root {
            self.config.root = graph::normalize(&self.config.root.join(root));
        }

        self.resolved = Some(ResolvedConfig::new(
            self.plugins.iter().map(|p| p.name().to_string()).collect(),
            user_config.mode.unwrap_or(env.mode),
            command.as_str(),
            self.config.root.display().to_string(),
        ));
        self.command = Some(command);
        self.phase = Phase::ConfigCaptured;
        Ok(())
    }

    /// Runs the `configResolved` hook on every plugin.
    pub fn resolve_config(&mut self) -> Result<()> {
        self.expect_phase(Phase::ConfigCaptured)?;

        let resolved = self.resolved.clone().unwrap_or_default();
        for plugin in &mut self.plugins {
            debug!(plugin = plugin.name(), hook = "configResolved", mode = %resolved.mode);
            plugin.config_resolved(&resolved);
        }

        self.phase = Phase::FullyConfigured;
        Ok(())
    }

    /// Runs `config` then `configResolved`.
    pub fn configure(&mut self, command: Command) -> Result<()> {
        self.capture_config(command)?;
        self.resolve_config()
    }

    /// Runs a full build: configuration, `buildStart`, graph construction,
    /// `buildEnd`, `generateBundle` and `closeBundle`.
    pub fn build(&mut self) -> Result<BuildOutput> {
        let start = Instant::now();
        self.start_session(Command::Build)?;

        let entries = self
            .config
            .input
            .iter()
            .map(|input| self.entry_id(input))
            .collect::<Vec<_>>();

        for entry in &entries {
            self.import(entry, None)?;
        }

        for plugin in &mut self.plugins {
            debug!(plugin = plugin.name(), hook = "buildEnd");
            plugin.build_end();
        }

        let bundle = self.render_bundle(&entries);
        let options = OutputOptions {
            dir: self.config.out_dir.clone(),
            ..OutputOptions::default()
        };

        for plugin in &mut self.plugins {
            debug!(plugin = plugin.name(), hook = "generateBundle", files = bundle.len());
            plugin.generate_bundle(&options, &bundle);
        }

        for plugin in &mut self.plugins {
            debug!(plugin = plugin.name(), hook = "closeBundle");
            plugin.close_bundle();
        }

        self.phase = Phase::Finished;

        Ok(BuildOutput {
            bundle,
            module_count: self.graph.len(),
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// Starts a dev session: configuration (if not done) and `buildStart`.
    pub fn serve(&mut self) -> Result<()> {
        self.start_session(Command::Serve)
    }

    /// Serves a module by URL or specifier through resolve/load/transform.
    pub fn request(&mut self, url: &str) -> Result<String> {
        self.expect_phase(Phase::Serving)?;

        let id = self.import(url, None)?;
        Ok(self
            .graph
            .get(&id)
            .map(|node| node.code.clone())
            .unwrap_or_default())
    }

    /// Forwards a file change: `watchChange` on every plugin, then, for
    /// creations and updates, `handleHotUpdate` with the affected modules.
    ///
    /// A module in the graph is marked stale rather than dropped, so it and
    /// its importers are reported on every change and it reloads on its next
    /// request.
    ///
    /// Returns the hot-update context if one was sent.
    pub fn file_changed(&mut self, path: &Path, event: ChangeEvent) -> Result<Option<HmrContext>> {
        self.expect_phase(Phase::Serving)?;

        let id = graph::normalize(path).display().to_string();
        let change = WatchChange::new(event);

        for plugin in &mut self.plugins {
            debug!(plugin = plugin.name(), hook = "watchChange", %id, event = %event);
            plugin.watch_change(&id, &change);
        }

        let mut modules = Vec::new();
        if self.graph.invalidate(&id) {
            modules.push(id.clone());
            modules.extend(self.graph.importers(&id).into_iter().map(str::to_string));
        }

        if event == ChangeEvent::Delete {
            return Ok(None);
        }

        let ctx = HmrContext {
            file: id,
            timestamp: Utc::now().timestamp_millis(),
            modules,
        };

        for plugin in &mut self.plugins {
            debug!(plugin = plugin.name(), hook = "handleHotUpdate", file = %ctx.file);
            plugin.handle_hot_update(&ctx);
        }

        Ok(Some(ctx))
    }

    /// Ends a dev session.
    pub fn close(&mut self) -> Result<()> {
        self.expect_phase(Phase::Serving)?;
        self.phase = Phase::Finished;
        Ok(())
    }

    /// Resolves, loads and transforms a module and its static imports,
    /// returning its resolved id. Up-to-date modules in the graph are reused;
    /// stale ones are reloaded in place.
    ///
    /// Does not check the phase: plugins rely on the host calling this only
    /// after configuration, and loading earlier yields whatever state they
    /// hold at that point.
    pub fn import(&mut self, specifier: &str, importer: Option<&str>) -> Result<String> {
        let id = self.resolve_id(specifier, importer)?;

        if self.graph.is_fresh(&id) {
            return Ok(id);
        }

        let code = self.load(&id)?;
        let code = self.transform(code, &id);

        let specifiers: Vec<String> = scan_imports(&code)
            .into_iter()
            .map(str::to_string)
            .collect();

        // Insert before following imports so cycles terminate.
        self.graph.insert(ModuleNode {
            id: id.clone(),
            code,
        });

        let mut imports = Vec::with_capacity(specifiers.len());
        for specifier in &specifiers {
            imports.push(self.import(specifier, Some(id.as_str()))?);
        }

        self.graph.set_imports(&id, &imports);

        Ok(id)
    }

    fn start_session(&mut self, command: Command) -> Result<()> {
        match self.phase {
            Phase::Uninitialized => self.configure(command)?,
            Phase::FullyConfigured if self.command == Some(command) => {}
            actual => {
                return Err(EngineError::OutOfOrder {
                    expected: Phase::FullyConfigured,
                    actual,
                });
            }
        }

        for plugin in &mut self.plugins {
            debug!(plugin = plugin.name(), hook = "buildStart");
            plugin.build_start();
        }

        self.phase = match command {
            Command::Serve => Phase::Serving,
            Command::Build => Phase::Building,
        };
        Ok(())
    }

    fn resolve_id(&self, specifier: &str, importer: Option<&str>) -> Result<String> {
        for plugin in &self.plugins {
            if let Some(id) = plugin.resolve_id(specifier) {
                debug!(plugin = plugin.name(), hook = "resolveId", specifier, %id);
                return Ok(id);
            }
        }

        let root = self.config.root.as_path();

        let path = if specifier.starts_with("./") || specifier.starts_with("../") {
            let base = importer
                .and_then(|importer| Path::new(importer).parent())
                .unwrap_or(root);
            base.join(specifier)
        } else if Path::new(specifier).starts_with(root) {
            PathBuf::from(specifier)
        } else if let Some(stripped) = specifier.strip_prefix('/') {
            root.join(stripped)
        } else {
            return Err(EngineError::UnresolvedImport {
                specifier: specifier.to_string(),
                importer: importer.unwrap_or("<entry>").to_string(),
            });
        };

        Ok(graph::normalize(&path).display().to_string())
    }

    fn load(&self, id: &str) -> Result<String> {
        for plugin in &self.plugins {
            if let Some(code) = plugin.load(id) {
                debug!(plugin = plugin.name(), hook = "load", id = %id.escape_debug());
                return Ok(code);
            }
        }

        if id.starts_with('\0') {
            return Err(EngineError::LoadFailed(id.escape_debug().to_string()));
        }

        fs::read_to_string(id).map_err(|e| EngineError::io(id, e))
    }

    fn transform(&self, mut code: String, id: &str) -> String {
        for plugin in &self.plugins {
            if let Some(transformed) = plugin.transform(&code, id) {
                debug!(plugin = plugin.name(), hook = "transform", id = %id.escape_debug());
                code = transformed;
            }
        }
        code
    }

    fn entry_id(&self, input: &str) -> String {
        graph::normalize(&self.config.root.join(input))
            .display()
            .to_string()
    }

    fn render_bundle(&self, entries: &[String]) -> OutputBundle {
        let mut bundle = OutputBundle::new();

        for entry in entries {
            let modules = self.graph.walk(entry);
            let code = modules
                .iter()
                .map(|node| node.code.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            let stem = Path::new(entry)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "index".to_string());

            bundle.insert(
                chunk_file_name(&stem, &code),
                OutputFile::Chunk {
                    name: stem,
                    modules: modules.iter().map(|node| node.id.clone()).collect(),
                    code,
                },
            );
        }

        bundle
    }

    fn expect_phase(&self, expected: Phase) -> Result<()> {
        if self.phase != expected {
            return Err(EngineError::OutOfOrder {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }
}
