//! Project root discovery.

use std::path::{Path, PathBuf};

use miette::{Result, miette};
use vite_info_engine::CONFIG_FILE_NAME;

/// Returns the canonical project root.
///
/// An explicit root is used as is. Otherwise the current directory and its
/// parents are searched for a config file, falling back to the current
/// directory.
pub fn project_root(explicit: Option<&str>) -> Result<PathBuf> {
    let base = match explicit {
        Some(root) => PathBuf::from(root),
        None => {
            std::env::current_dir().map_err(|e| miette!("Cannot get current directory: {}", e))?
        }
    };

    let base = base
        .canonicalize()
        .map_err(|e| miette!("Cannot access {}: {}", base.display(), e))?;

    if explicit.is_some() {
        return Ok(base);
    }

    Ok(find_root_from(&base).unwrap_or(base))
}

/// Finds the nearest directory containing a config file.
pub fn find_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE_NAME).is_file())
        .map(Path::to_path_buf)
}
