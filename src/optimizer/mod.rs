//! # Optimizer Module
//!
//! Modulo che separa le responsabilità del batch in sottomoduli:
//! - `batch_optimizer`: Orchestratore principale
//! - `task_optimizer`: Worker per singoli file
//! - `progress_tracker`: Gestione progress unificata
//! - `path_resolver`: Logica di calcolo path centralizzata

pub mod batch_optimizer;
pub mod path_resolver;
pub mod progress_tracker;
pub mod task_optimizer;

pub use batch_optimizer::{BatchOptimizer, BatchReport};
pub use path_resolver::PathResolver;
pub use progress_tracker::ProgressTracker;
pub use task_optimizer::{FileReport, TaskOptimizer};
