//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di minificazione
//! - Fornisce validazione dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `remove_metadata`: Rimuove gli elementi `<metadata>` (default: true)
//! - `remove_descriptive_elements`: Rimuove `<title>` e `<desc>` (default: false)
//! - `rename_identifiers`: Rinomina `id` e `class` con alias brevi (default: false)
//! - `make_unreadable`: Output su una sola riga, implica la rinomina (default: false)
//! - `use_external_optimizer`: Usa scour se disponibile (default: true)
//! - `workers`: Numero di file elaborati in parallelo (default: 4)
//! - `output_path`: Directory di output (default: None = `<input>_minified`)
//! - `dry_run`: Simulazione senza scrivere file (default: false)
//! - `json_output`: Eventi JSON su stdout (default: false)
//!
//! ## Esempio:
//! ```rust
//! use svg_minifier::Config;
//!
//! let config = Config {
//!     rename_identifiers: true,
//!     workers: 8,
//!     ..Default::default()
//! };
//! config.validate().unwrap();
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::MinifyError;

/// Configuration for SVG minification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remove `<metadata>` elements
    pub remove_metadata: bool,
    /// Remove `<title>` and `<desc>` elements
    pub remove_descriptive_elements: bool,
    /// Replace ids and classes with short aliases
    pub rename_identifiers: bool,
    /// Put the whole document on one line
    pub make_unreadable: bool,
    /// Prefer the external optimizer (scour) when it is installed
    pub use_external_optimizer: bool,
    /// Number of files processed in parallel
    pub workers: usize,
    /// Output directory (None = sibling `<input>_minified`)
    pub output_path: Option<PathBuf>,
    /// Dry run - don't write any file
    pub dry_run: bool,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remove_metadata: true,
            remove_descriptive_elements: false,
            rename_identifiers: false,
            make_unreadable: false,
            use_external_optimizer: true,
            workers: 4,
            output_path: None,
            dry_run: false,
            json_output: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), MinifyError> {
        if self.workers == 0 {
            return Err(MinifyError::Validation(
                "Number of workers must be greater than 0".to_string(),
            ));
        }

        if let Some(ref output_path) = self.output_path {
            if output_path.exists() && !output_path.is_dir() {
                return Err(MinifyError::Validation(format!(
                    "Output path is not a directory: {}",
                    output_path.display()
                )));
            }
        }

        Ok(())
    }

    /// Load configuration from file, falling back to defaults when it is missing
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.workers = 0;
        assert!(matches!(config.validate(), Err(MinifyError::Validation(_))));

        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("not_a_dir.svg");
        std::fs::write(&file, "<svg/>").unwrap();
        config.workers = 2;
        config.output_path = Some(file);
        assert!(config.validate().is_err());

        config.output_path = Some(temp_dir.path().join("created_later"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.remove_metadata);
        assert!(!config.remove_descriptive_elements);
        assert!(!config.rename_identifiers);
        assert!(!config.make_unreadable);
        assert!(config.use_external_optimizer);
        assert!(!config.dry_run);
        assert_eq!(config.workers, 4);
        assert!(config.output_path.is_none());
    }

    #[tokio::test]
    async fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let original_config = Config {
            remove_descriptive_elements: true,
            rename_identifiers: true,
            use_external_optimizer: false,
            workers: 8,
            dry_run: true,
            ..Config::default()
        };

        original_config.save_to_file(&config_path).await.unwrap();
        let loaded_config = Config::from_file(&config_path).await.unwrap();

        assert!(loaded_config.remove_descriptive_elements);
        assert!(loaded_config.rename_identifiers);
        assert!(!loaded_config.use_external_optimizer);
        assert!(loaded_config.dry_run);
        assert_eq!(loaded_config.workers, 8);
    }

    #[test]
    fn test_partial_and_missing_files() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.json");
        std::fs::write(&config_path, r#"{ "make_unreadable": true }"#).unwrap();

        let loaded = tokio_test::block_on(Config::from_file(&config_path)).unwrap();
        assert!(loaded.make_unreadable);
        assert!(loaded.remove_metadata);
        assert_eq!(loaded.workers, 4);

        let missing = tokio_test::block_on(Config::from_file(&temp_dir.path().join("none.json"))).unwrap();
        assert_eq!(missing.workers, 4);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.json");
        std::fs::write(&config_path, r#"{ "workers": 0 }"#).unwrap();

        assert!(tokio_test::block_on(Config::from_file(&config_path)).is_err());
    }
}
