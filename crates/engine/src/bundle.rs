//! Chunk naming and writing emitted files to disk.

use std::fs;
use std::path::Path;

use vite_info_core::OutputBundle;

use crate::error::{EngineError, Result};

/// Length of the content hash embedded in chunk file names.
const HASH_LEN: usize = 8;

/// Returns `assets/<stem>-<hash>.js`, hashing the chunk code with blake3.
pub fn chunk_file_name(stem: &str, code: &str) -> String {
    let hash = blake3::hash(code.as_bytes()).to_hex();
    format!("assets/{}-{}.js", stem, &hash[..HASH_LEN])
}

/// Writes every file of a bundle below `dir`.
pub fn write_bundle(bundle: &OutputBundle, dir: &Path) -> Result<()> {
    for (file_name, file) in bundle.iter() {
        let path = dir.join(file_name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| EngineError::io(parent, e))?;
        }

        fs::write(&path, file.contents()).map_err(|e| EngineError::io(&path, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vite_info_core::OutputFile;

    #[test]
    fn test_chunk_file_name_shape() {
        let name = chunk_file_name("index", "console.log(1);");
        assert!(name.starts_with("assets/index-"));
        assert!(name.ends_with(".js"));
        assert_eq!(name.len(), "assets/index-".len() + HASH_LEN + ".js".len());
    }

    #[test]
    fn test_chunk_file_name_follows_content() {
        assert_eq!(chunk_file_name("a", "x"), chunk_file_name("a", "x"));
        assert_ne!(chunk_file_name("a", "x"), chunk_file_name("a", "y"));
    }

    #[test]
    fn test_write_bundle() {
        let dir = tempdir().unwrap();
        let mut bundle = OutputBundle::new();
        bundle.insert(
            "assets/index-00000000.js",
            OutputFile::Chunk {
                name: "index".to_string(),
                code: "export {};".to_string(),
                modules: vec![],
            },
        );

        write_bundle(&bundle, dir.path()).unwrap();

        let written = fs::read_to_string(dir.path().join("assets/index-00000000.js")).unwrap();
        assert_eq!(written, "export {};");
    }
}
