//! Build command implementation.

use std::path::Path;

use miette::{Result, miette};
use vite_info_engine::{Engine, EngineConfig, write_bundle};
use vite_info_plugin::ViteInfoPlugin;

use crate::output;

/// Runs a build with the vite-info plugin registered.
pub fn execute(root: &Path, mode: Option<String>, write: bool) -> Result<()> {
    let mut config =
        EngineConfig::load(root).map_err(|e| miette!("Failed to load config: {}", e))?;

    if let Some(mode) = mode {
        config = config.with_mode(mode);
    }

    let out_path = config.out_path();

    output::info(&format!("Building {}", root.display()));

    let mut engine = Engine::new(config).with_plugin(Box::new(ViteInfoPlugin::new()));
    let report = engine
        .build()
        .map_err(|e| miette!("Build failed: {}", e))?;

    if write {
        write_bundle(&report.bundle, &out_path)
            .map_err(|e| miette!("Failed to write bundle: {}", e))?;
        output::success(&format!("Wrote bundle to {}", out_path.display()));
    }

    output::summary(report.bundle.len(), report.module_count, report.duration_ms);

    Ok(())
}
