//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche di minificazione.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Tracking statistiche del batch (file riusciti, falliti, byte)
//! - Riepilogo finale con byte risparmiati e percentuale
//!
//! ## Componenti principali:
//! - `ProgressManager`: Gestisce la progress bar principale
//! - `MinifyStats`: Traccia statistiche cumulative
//!
//! ## Statistiche tracciate:
//! - **succeeded**: File minificati correttamente
//! - **failed**: File non validi o non leggibili (contribuiscono 0 byte)
//! - **total_original_size**: Dimensione totale dei file originali
//! - **total_minified_size**: Dimensione totale dei file minificati
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:02] [========================================] 12/12 (100%) ✅ hero.svg: 41.3% saved
//! ```

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::file_manager::FileManager;

/// Manages progress reporting for a batch
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Progress manager that draws nothing (JSON mode and tests)
    pub fn hidden(total_files: u64) -> Self {
        Self {
            bar: ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::hidden()),
        }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Statistics for a minification batch
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MinifyStats {
    pub succeeded: usize,
    pub failed: usize,
    pub total_original_size: u64,
    pub total_minified_size: u64,
}

impl MinifyStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_success(&mut self, original_size: u64, minified_size: u64) {
        self.succeeded += 1;
        self.total_original_size += original_size;
        self.total_minified_size += minified_size;
    }

    pub fn add_failure(&mut self) {
        self.failed += 1;
    }

    pub fn files_processed(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn bytes_saved(&self) -> u64 {
        self.total_original_size.saturating_sub(self.total_minified_size)
    }

    pub fn overall_reduction_percent(&self) -> f64 {
        FileManager::calculate_reduction(self.total_original_size, self.total_minified_size)
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Minified: {} | Failed: {} | {} -> {} | Saved: {} ({:.1}%)",
            self.succeeded,
            self.failed,
            FileManager::format_size(self.total_original_size),
            FileManager::format_size(self.total_minified_size),
            FileManager::format_size(self.bytes_saved()),
            self.overall_reduction_percent()
        )
    }
}
