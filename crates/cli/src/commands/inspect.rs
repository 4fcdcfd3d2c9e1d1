//! Inspect command implementation.

use std::path::Path;

use miette::{Result, miette};
use vite_info_core::Command;
use vite_info_engine::{Engine, EngineConfig};
use vite_info_plugin::{VIRTUAL_MODULE_ID, ViteInfoPlugin};

use crate::output;

/// Prints the virtual module as application code would receive it.
pub fn execute(root: &Path, command: &str) -> Result<()> {
    let source = render(root, command)?;

    output::section_header(VIRTUAL_MODULE_ID);
    print!("{}", source);

    Ok(())
}

fn render(root: &Path, command: &str) -> Result<String> {
    let command: Command = command.parse().map_err(|e| miette!("{}", e))?;
    let config = EngineConfig::load(root).map_err(|e| miette!("Failed to load config: {}", e))?;

    let mut engine = Engine::new(config).with_plugin(Box::new(ViteInfoPlugin::new()));
    engine
        .configure(command)
        .map_err(|e| miette!("Failed to configure: {}", e))?;

    let id = engine
        .import(VIRTUAL_MODULE_ID, None)
        .map_err(|e| miette!("Failed to load {}: {}", VIRTUAL_MODULE_ID, e))?;

    Ok(engine
        .graph()
        .get(&id)
        .map(|node| node.code.clone())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_for_build() {
        let dir = tempdir().unwrap();
        let source = render(dir.path(), "build").unwrap();

        assert!(source.contains("export const viteCommand = 'build';"));
        assert!(source.contains("export const viteMode = 'production';"));
        assert!(source.contains("export const pluginNames = ['vite-plugin-vite-info'];"));
    }

    #[test]
    fn test_render_rejects_unknown_command() {
        let dir = tempdir().unwrap();
        assert!(render(dir.path(), "preview").is_err());
    }
}
