//! # Task Optimizer Module
//!
//! Worker per la minificazione di singoli file.
//! Separato dall'orchestratore principale per maggiore modularità.
//!
//! Un errore su un file (lettura, UTF-8, documento non SVG) viene registrato
//! nel `FileReport` e non interrompe il batch.

use crate::{error::MinifyError, file_manager::FileManager, pipeline::Minifier};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Esito dell'elaborazione di un file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub output_path: PathBuf,
    pub original_size: u64,
    pub minified_size: u64,
    pub success: bool,
    pub error: Option<String>,
}

impl FileReport {
    pub fn reduction_percent(&self) -> f64 {
        FileManager::calculate_reduction(self.original_size, self.minified_size)
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    }

    /// Riga di stato stampata nel riepilogo
    pub fn status_line(&self) -> String {
        if self.success {
            format!(
                "[OK] {}: {} -> {} ({:.1}% saved)",
                self.file_name(),
                FileManager::format_size(self.original_size),
                FileManager::format_size(self.minified_size),
                self.reduction_percent()
            )
        } else {
            format!(
                "[ERROR] {}: {}",
                self.file_name(),
                self.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}

/// Worker per elaborazione singoli file
#[derive(Debug, Clone)]
pub struct TaskOptimizer {
    minifier: Arc<Minifier>,
    dry_run: bool,
}

impl TaskOptimizer {
    /// Crea nuovo task optimizer
    pub fn new(minifier: Arc<Minifier>, dry_run: bool) -> Self {
        Self { minifier, dry_run }
    }

    /// Processa un singolo file, senza mai propagare l'errore
    pub async fn process_file(&self, input: &Path, output: &Path) -> FileReport {
        match self.minify_file(input, output).await {
            Ok((original_size, minified_size)) => FileReport {
                path: input.to_path_buf(),
                output_path: output.to_path_buf(),
                original_size,
                minified_size,
                success: true,
                error: None,
            },
            Err(e) => {
                debug!("Failed to minify {}: {}", input.display(), e);
                FileReport {
                    path: input.to_path_buf(),
                    output_path: output.to_path_buf(),
                    original_size: 0,
                    minified_size: 0,
                    success: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn minify_file(&self, input: &Path, output: &Path) -> Result<(u64, u64), MinifyError> {
        let bytes = tokio::fs::read(input).await?;
        let document = String::from_utf8(bytes).map_err(|_| MinifyError::InvalidUtf8)?;
        let original_size = document.len() as u64;

        let minifier = Arc::clone(&self.minifier);
        let minified = tokio::task::spawn_blocking(move || minifier.minify(&document))
            .await
            .map_err(|e| MinifyError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;

        if self.dry_run {
            debug!("Dry run: would write {}", output.display());
        } else {
            tokio::fs::write(output, &minified).await?;
        }

        Ok((original_size, minified.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::MinifyOptions;
    use tempfile::TempDir;

    fn task(dry_run: bool) -> TaskOptimizer {
        TaskOptimizer::new(Arc::new(Minifier::built_in(MinifyOptions::default())), dry_run)
    }

    #[tokio::test]
    async fn test_process_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("hero.svg");
        let output = temp_dir.path().join("hero.min.svg");
        tokio::fs::write(&input, "<svg>\n  <!-- c -->\n  <rect x=\"1.000\"/>\n</svg>\n")
            .await
            .unwrap();

        let report = task(false).process_file(&input, &output).await;
        assert!(report.success);
        assert_eq!(report.original_size, 46);
        assert_eq!(report.minified_size, 24);
        assert_eq!(
            tokio::fs::read_to_string(&output).await.unwrap(),
            "<svg><rect x=\"1\"/></svg>"
        );
        assert!(report.status_line().starts_with("[OK] hero.svg"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("bad.svg");
        let output = temp_dir.path().join("out.svg");
        tokio::fs::write(&input, [0x3c, 0x73, 0x76, 0x67, 0xff, 0xfe]).await.unwrap();

        let report = task(false).process_file(&input, &output).await;
        assert!(!report.success);
        assert_eq!(report.original_size, 0);
        assert_eq!(report.minified_size, 0);
        assert!(report.error.is_some());
        assert!(!output.exists());
        assert!(report.status_line().starts_with("[ERROR] bad.svg"));
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("a.svg");
        let output = temp_dir.path().join("out.svg");
        tokio::fs::write(&input, "<svg/>").await.unwrap();

        let report = task(true).process_file(&input, &output).await;
        assert!(report.success);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_missing_input_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let report = task(false)
            .process_file(&temp_dir.path().join("nope.svg"), &temp_dir.path().join("o.svg"))
            .await;
        assert!(!report.success);
    }
}
