//! # File Management Module
//!
//! Questo modulo gestisce le operazioni sui file e la discovery degli SVG.
//!
//! ## Responsabilità:
//! - Discovery dei file `.svg` in una cartella (solo figli diretti)
//! - Determinazione del tipo di file dall'estensione
//! - Calcolo dei percorsi di output di default
//! - Utilità per calcoli dimensioni e percentuali
//!
//! ## Operazioni sui file:
//! - `find_svg_files()`: Trova i file SVG, ordinati per percorso
//! - `is_svg()`: Estensione `svg` (case-insensitive)
//! - `default_output_dir()`: `foo` → `foo_minified`
//! - `default_output_file()`: `hero.svg` → `hero.min.svg`
//!
//! ## Utilità:
//! - `format_size()`: Converte bytes in formato leggibile (KB, MB, GB)
//! - `calculate_reduction()`: Calcola percentuale di riduzione
//!
//! ## Esempio:
//! ```rust,no_run
//! use svg_minifier::file_manager::FileManager;
//! use std::path::Path;
//!
//! let files = FileManager::find_svg_files(Path::new("icons")).unwrap();
//! for file in files {
//!     println!("{}", file.display());
//! }
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Find the SVG files directly inside `input_dir`, sorted by path
    pub fn find_svg_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(input_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if Self::is_svg(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Check if a file has the `svg` extension
    pub fn is_svg(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("svg"))
            .unwrap_or(false)
    }

    /// Sibling folder `<name>_minified` of an input folder
    ///
    /// `.` and `..` are resolved first so the output never lands inside the input.
    pub fn default_output_dir(input_dir: &Path) -> PathBuf {
        let resolved = match input_dir.file_name() {
            Some(_) => input_dir.to_path_buf(),
            None => input_dir.canonicalize().unwrap_or_else(|_| input_dir.to_path_buf()),
        };
        let name = resolved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "svg".to_string());
        resolved.with_file_name(format!("{}_minified", name))
    }

    /// `hero.svg` → `hero.min.svg` next to the input
    pub fn default_output_file(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        input.with_file_name(format!("{}.min.svg", stem))
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Calculate percentage reduction
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
        if original_size == 0 {
            0.0
        } else {
            ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
        }
    }
}
