//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `MinifyError` enum per categorizzare gli errori possibili
//! - Fornisce messaggi di errore descrittivi
//! - Integra con `thiserror` per la conversione automatica da `std::io::Error`
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (permessi, disco pieno, etc.)
//! - `InputNotFound`: File o cartella di input inesistente
//! - `InvalidUtf8`: Il file non è testo UTF-8
//! - `NotSvg`: Il documento non contiene un elemento `<svg>`
//! - `ExternalOptimizer`: Il tool esterno (scour) è fallito
//! - `Validation`: Errori di validazione della configurazione
//!
//! Gli errori per singolo file finiscono nel report del file e non
//! interrompono il batch.

use std::path::PathBuf;

/// Custom error types for SVG minification
#[derive(thiserror::Error, Debug)]
pub enum MinifyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("File is not valid UTF-8 text")]
    InvalidUtf8,

    #[error("Document has no <svg> element")]
    NotSvg,

    #[error("External optimizer error: {0}")]
    ExternalOptimizer(String),

    #[error("Configuration error: {0}")]
    Validation(String),
}
