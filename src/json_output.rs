//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per l'uso da altri programmi.
//!
//! ## Responsabilità:
//! - Emette un oggetto JSON per riga su stdout per ogni evento del batch
//! - Utilizza `FileReport` e `MinifyStats` come sorgente dei dati
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio del batch
//! - `file_complete`: Fine elaborazione di un file (riuscita o fallita)
//! - `complete`: Fine del batch con statistiche finali
//! - `error`: Errore generale

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::optimizer::task_optimizer::FileReport;
use crate::progress::MinifyStats;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum JsonMessage {
    /// Inizio del batch
    #[serde(rename = "start")]
    Start {
        input: PathBuf,
        output: PathBuf,
        total_files: usize,
        config: JsonConfig,
    },

    /// Fine elaborazione di un file specifico
    #[serde(rename = "file_complete")]
    FileComplete {
        path: PathBuf,
        output_path: PathBuf,
        original_size: u64,
        minified_size: u64,
        reduction_percent: f64,
        success: bool,
        error: Option<String>,
    },

    /// Batch completato
    #[serde(rename = "complete")]
    Complete {
        succeeded: usize,
        failed: usize,
        total_original_size: u64,
        total_minified_size: u64,
        bytes_saved: u64,
        reduction_percent: f64,
        duration_seconds: f64,
    },

    /// Errore generale
    #[serde(rename = "error")]
    Error {
        message: String,
        details: Option<String>,
    },
}

/// Configurazione riportata nel messaggio `start`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JsonConfig {
    pub remove_metadata: bool,
    pub remove_descriptive_elements: bool,
    pub rename_identifiers: bool,
    pub make_unreadable: bool,
    pub external_optimizer: Option<String>,
    pub workers: usize,
    pub dry_run: bool,
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    /// Crea un messaggio di inizio
    pub fn start(input: PathBuf, output: PathBuf, total_files: usize, config: JsonConfig) -> Self {
        Self::Start {
            input,
            output,
            total_files,
            config,
        }
    }

    /// Crea un messaggio di completamento file
    pub fn file_complete(report: &FileReport) -> Self {
        Self::FileComplete {
            path: report.path.clone(),
            output_path: report.output_path.clone(),
            original_size: report.original_size,
            minified_size: report.minified_size,
            reduction_percent: report.reduction_percent(),
            success: report.success,
            error: report.error.clone(),
        }
    }

    /// Crea un messaggio di completamento generale
    pub fn complete(stats: &MinifyStats, duration_seconds: f64) -> Self {
        Self::Complete {
            succeeded: stats.succeeded,
            failed: stats.failed,
            total_original_size: stats.total_original_size,
            total_minified_size: stats.total_minified_size,
            bytes_saved: stats.bytes_saved(),
            reduction_percent: stats.overall_reduction_percent(),
            duration_seconds,
        }
    }

    /// Crea un messaggio di errore
    pub fn error(message: String, details: Option<String>) -> Self {
        Self::Error { message, details }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_tagged() {
        let json = serde_json::to_value(JsonMessage::error("boom".to_string(), None)).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "boom");

        let mut stats = MinifyStats::new();
        stats.add_success(100, 40);
        let json = serde_json::to_value(JsonMessage::complete(&stats, 1.5)).unwrap();
        assert_eq!(json["type"], "complete");
        assert_eq!(json["bytes_saved"], 60);
        assert_eq!(json["succeeded"], 1);
    }

    #[test]
    fn test_file_complete_from_report() {
        let report = FileReport {
            path: PathBuf::from("in/a.svg"),
            output_path: PathBuf::from("out/a.svg"),
            original_size: 200,
            minified_size: 150,
            success: true,
            error: None,
        };
        let message = JsonMessage::file_complete(&report);
        let text = serde_json::to_string(&message).unwrap();
        assert!(text.starts_with(r#"{"type":"file_complete""#));

        let parsed: JsonMessage = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, message);
    }
}
