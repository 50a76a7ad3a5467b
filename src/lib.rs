//! # SVG Minifier Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `pipeline`: Riscrittura testuale di un documento (struttura, CSS, path, rinomina, riga singola)
//! - `external`: Optimizer esterno (scour) come capability opzionale
//! - `tool_resolver`: Ricerca dei tool esterni
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom
//! - `file_manager`: Discovery degli SVG e utilità sui file
//! - `optimizer`: Orchestratore del batch e worker per file
//! - `progress` / `json_output`: Progress bar, statistiche, eventi JSON
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use svg_minifier::{BatchOptimizer, Config};
//! use std::path::Path;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let optimizer = BatchOptimizer::new(Config::default())?;
//! let batch = optimizer.run(Path::new("icons")).await?;
//! println!("{}", batch.stats.format_summary());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod file_manager;
pub mod json_output;
pub mod optimizer;
pub mod pipeline;
pub mod progress;
pub mod tool_resolver;
pub mod utils;

pub use config::Config;
pub use error::MinifyError;
pub use optimizer::{BatchOptimizer, BatchReport, FileReport};
pub use pipeline::{Minifier, MinifyOptions, OptimizerChoice};
