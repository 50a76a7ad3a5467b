//! # Progress Tracking Module
//!
//! Tracker thread-safe condiviso tra i task del batch.
//! Gestisce sia output JSON che progress bar tradizionale.

use crate::{
    json_output::JsonMessage,
    optimizer::task_optimizer::FileReport,
    progress::{MinifyStats, ProgressManager},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Tracker progress unificato
#[derive(Clone)]
pub struct ProgressTracker {
    total_files: usize,
    json_output: bool,
    stats: Arc<Mutex<MinifyStats>>,
    progress_manager: ProgressManager,
}

impl ProgressTracker {
    /// Crea un nuovo tracker; in modalità JSON la progress bar è nascosta
    pub fn new(total_files: usize, json_output: bool) -> Self {
        let progress_manager = if json_output {
            ProgressManager::hidden(total_files as u64)
        } else {
            ProgressManager::new(total_files as u64)
        };

        Self {
            total_files,
            json_output,
            stats: Arc::new(Mutex::new(MinifyStats::new())),
            progress_manager,
        }
    }

    /// Aggiorna progress bar con messaggio
    pub fn update_message(&self, message: &str) {
        self.progress_manager.update(message);
    }

    /// Finalizza progress bar
    pub fn finish(&self, summary: &str) {
        self.progress_manager.finish(summary);
    }

    /// Gestisce completamento file con eventi JSON automatici
    pub async fn handle_file_completion(&self, report: &FileReport) {
        let processed = {
            let mut stats = self.stats.lock().await;
            if report.success {
                stats.add_success(report.original_size, report.minified_size);
            } else {
                stats.add_failure();
            }
            stats.files_processed()
        };
        debug!("Processed {}/{} files", processed, self.total_files);

        if self.json_output {
            JsonMessage::file_complete(report).emit();
        }

        self.update_message(&report.status_line());
    }

    /// Ottieni statistiche per report finale
    pub async fn get_stats(&self) -> MinifyStats {
        self.stats.lock().await.clone()
    }
}
