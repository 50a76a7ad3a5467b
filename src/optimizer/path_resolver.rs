//! # Path Resolution Module
//!
//! Centralizza la logica di calcolo dei path di output.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Output dir + stesso nome file dell'input
    pub fn get_output_path(input_path: &Path, output_dir: &Path) -> Result<PathBuf> {
        let file_name = input_path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", input_path.display()))?;

        let result = output_dir.join(file_name);
        debug!("Resolved output path: {} -> {}", input_path.display(), result.display());
        Ok(result)
    }

    /// Crea le directory parent se necessario
    pub async fn ensure_parent_dirs(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                anyhow::anyhow!("Failed to create parent directories for {}: {}", path.display(), e)
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_keeps_file_name() {
        let out = PathResolver::get_output_path(Path::new("/in/icons/hero.svg"), Path::new("/out")).unwrap();
        assert_eq!(out, PathBuf::from("/out/hero.svg"));
    }

    #[test]
    fn test_output_path_requires_file_name() {
        assert!(PathResolver::get_output_path(Path::new("/"), Path::new("/out")).is_err());
    }

    #[tokio::test]
    async fn test_ensure_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a").join("b").join("hero.svg");
        PathResolver::ensure_parent_dirs(&target).await.unwrap();
        assert!(temp_dir.path().join("a").join("b").is_dir());
    }
}
