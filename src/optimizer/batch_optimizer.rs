//! # Batch Optimizer Main Orchestrator
//!
//! Orchestratore principale che delega responsabilità ai moduli specializzati.
//!
//! ## Flusso:
//! 1. Risolve una volta sola l'optimizer strutturale (scour o built-in)
//! 2. Trova i file SVG nella cartella di input
//! 3. Crea la cartella di output
//! 4. Elabora i file in parallelo (al massimo `workers` alla volta)
//! 5. Raccoglie i report nell'ordine di input e stampa il riepilogo

use crate::{
    config::Config,
    external::resolve_optimizer,
    file_manager::FileManager,
    json_output::{JsonConfig, JsonMessage},
    optimizer::{
        path_resolver::PathResolver,
        progress_tracker::ProgressTracker,
        task_optimizer::{FileReport, TaskOptimizer},
    },
    pipeline::{Minifier, MinifyOptions, OptimizerChoice},
    progress::MinifyStats,
    tool_resolver::ToolPathResolver,
};
use anyhow::Result;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{error, info};

/// Risultato di un batch: report nell'ordine di input e totali
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub reports: Vec<FileReport>,
    pub stats: MinifyStats,
}

/// Orchestratore principale
pub struct BatchOptimizer {
    config: Config,
    minifier: Arc<Minifier>,
}

impl BatchOptimizer {
    /// Crea nuova istanza, cercando scour se abilitato
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let choice = resolve_optimizer(config.use_external_optimizer, &ToolPathResolver::new());
        Ok(Self::with_choice(config, choice))
    }

    /// Crea nuova istanza con un optimizer strutturale già scelto
    pub fn with_choice(config: Config, choice: OptimizerChoice) -> Self {
        let minifier = Arc::new(Minifier::new(MinifyOptions::from(&config), choice));
        Self { config, minifier }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Minifica tutti gli SVG di una cartella
    pub async fn run(&self, input_dir: &Path) -> Result<BatchReport> {
        let start_time = Instant::now();
        let output_dir = self
            .config
            .output_path
            .clone()
            .unwrap_or_else(|| FileManager::default_output_dir(input_dir));

        let files = FileManager::find_svg_files(input_dir)?;
        self.emit_start_message(input_dir, &output_dir, files.len());
        self.log_configuration(&output_dir, files.len());

        if !self.config.dry_run {
            tokio::fs::create_dir_all(&output_dir).await.map_err(|e| {
                anyhow::anyhow!("Failed to create output directory {}: {}", output_dir.display(), e)
            })?;
        }

        if files.is_empty() {
            self.handle_empty_directory(input_dir, start_time);
            return Ok(BatchReport::default());
        }

        let tracker = ProgressTracker::new(files.len(), self.config.json_output);
        let reports = self
            .process_files_concurrently(files, &output_dir, tracker.clone())
            .await?;

        let stats = tracker.get_stats().await;
        tracker.finish(&stats.format_summary());
        self.print_final_stats(&reports, &stats, start_time.elapsed().as_secs_f64());

        Ok(BatchReport { reports, stats })
    }

    /// Minifica un singolo file
    pub async fn run_single(&self, input: &Path, output: &Path) -> Result<FileReport> {
        let start_time = Instant::now();
        self.emit_start_message(input, output, 1);

        if !self.config.dry_run {
            PathResolver::ensure_parent_dirs(output).await?;
        }

        let tracker = ProgressTracker::new(1, self.config.json_output);
        let report = TaskOptimizer::new(Arc::clone(&self.minifier), self.config.dry_run)
            .process_file(input, output)
            .await;
        tracker.handle_file_completion(&report).await;

        let stats = tracker.get_stats().await;
        tracker.finish(&stats.format_summary());
        self.print_final_stats(std::slice::from_ref(&report), &stats, start_time.elapsed().as_secs_f64());

        Ok(report)
    }

    /// Processa file con concorrenza limitata; i report restano nell'ordine di input
    async fn process_files_concurrently(
        &self,
        files: Vec<PathBuf>,
        output_dir: &Path,
        progress_tracker: ProgressTracker,
    ) -> Result<Vec<FileReport>> {
        let semaphore = Arc::new(Semaphore::new(self.config.workers));
        let task_optimizer = TaskOptimizer::new(Arc::clone(&self.minifier), self.config.dry_run);
        let mut tasks = Vec::with_capacity(files.len());

        for file_path in files {
            let output_path = PathResolver::get_output_path(&file_path, output_dir)?;
            let semaphore = Arc::clone(&semaphore);
            let task_optimizer = task_optimizer.clone();
            let progress_clone = progress_tracker.clone();

            tasks.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await?;
                let report = task_optimizer.process_file(&file_path, &output_path).await;
                progress_clone.handle_file_completion(&report).await;
                Ok::<FileReport, anyhow::Error>(report)
            }));
        }

        let mut reports = Vec::with_capacity(tasks.len());
        for result in join_all(tasks).await {
            reports.push(result??);
        }

        Ok(reports)
    }

    /// Invia messaggio di inizio
    fn emit_start_message(&self, input: &Path, output: &Path, total_files: usize) {
        if self.config.json_output {
            JsonMessage::start(
                input.to_path_buf(),
                output.to_path_buf(),
                total_files,
                self.json_config(),
            )
            .emit();
        } else {
            info!("Starting SVG minification in: {}", input.display());
        }
    }

    fn json_config(&self) -> JsonConfig {
        let options = self.minifier.options();
        let external_optimizer = match self.minifier.choice() {
            OptimizerChoice::External(optimizer) => Some(optimizer.name().to_string()),
            OptimizerChoice::BuiltIn => None,
        };

        JsonConfig {
            remove_metadata: options.remove_metadata,
            remove_descriptive_elements: options.remove_descriptive_elements,
            rename_identifiers: options.rename_identifiers,
            make_unreadable: options.make_unreadable,
            external_optimizer,
            workers: self.config.workers,
            dry_run: self.config.dry_run,
        }
    }

    /// Logga configurazione (solo se non JSON mode)
    fn log_configuration(&self, output_dir: &Path, total_files: usize) {
        if self.config.json_output {
            return;
        }

        let options = self.minifier.options();
        info!("Output directory: {}", output_dir.display());
        info!("Structural optimizer: {:?}", self.minifier.choice());
        if !options.remove_metadata {
            info!("Keeping <metadata> elements");
        }
        if options.remove_descriptive_elements {
            info!("Removing <title> and <desc> elements");
        }
        if options.rename_identifiers {
            info!("Renaming ids and classes");
        }
        if options.make_unreadable {
            info!("Single-line output");
        }
        if self.config.dry_run {
            info!("Dry run mode: No files will be written");
        }
        info!("Found {} SVG files to process", total_files);
    }

    /// Gestisce directory vuota
    fn handle_empty_directory(&self, input_dir: &Path, start_time: Instant) {
        if self.config.json_output {
            JsonMessage::complete(&MinifyStats::new(), start_time.elapsed().as_secs_f64()).emit();
        } else {
            info!("No SVG files found in {}", input_dir.display());
        }
    }

    /// Stampa una riga per file (in ordine di input) e il riepilogo finale
    fn print_final_stats(&self, reports: &[FileReport], stats: &MinifyStats, duration: f64) {
        if self.config.json_output {
            JsonMessage::complete(stats, duration).emit();
            return;
        }

        for report in reports {
            if report.success {
                info!("{}", report.status_line());
            } else {
                error!("{}", report.status_line());
            }
        }

        info!("=== Minification Complete ===");
        info!("Files minified: {}", stats.succeeded);
        info!("Files failed: {}", stats.failed);
        info!(
            "Total size: {} -> {}",
            FileManager::format_size(stats.total_original_size),
            FileManager::format_size(stats.total_minified_size)
        );
        info!(
            "Bytes saved: {} ({:.2}%)",
            FileManager::format_size(stats.bytes_saved()),
            stats.overall_reduction_percent()
        );
        info!("Duration: {:.2}s", duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn built_in(config: Config) -> BatchOptimizer {
        BatchOptimizer::with_choice(config, OptimizerChoice::BuiltIn)
    }

    #[tokio::test]
    async fn test_reports_follow_input_order() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("icons");
        std::fs::create_dir(&input).unwrap();
        for name in ["c.svg", "a.svg", "b.svg"] {
            std::fs::write(input.join(name), "<svg>\n  <g/>\n</svg>").unwrap();
        }

        let optimizer = built_in(Config {
            workers: 2,
            ..Config::default()
        });
        let batch = optimizer.run(&input).await.unwrap();

        let names: Vec<_> = batch.reports.iter().map(FileReport::file_name).collect();
        assert_eq!(names, vec!["a.svg", "b.svg", "c.svg"]);
        assert_eq!(batch.stats.succeeded, 3);

        let output = temp_dir.path().join("icons_minified");
        assert_eq!(std::fs::read_to_string(output.join("a.svg")).unwrap(), "<svg><g/></svg>");
    }

    #[tokio::test]
    async fn test_empty_folder_creates_output() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out");
        let optimizer = built_in(Config {
            output_path: Some(out.clone()),
            ..Config::default()
        });

        let batch = optimizer.run(temp_dir.path()).await.unwrap();
        assert!(batch.reports.is_empty());
        assert!(out.is_dir());
    }

    #[tokio::test]
    async fn test_run_single() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("hero.svg");
        let output = FileManager::default_output_file(&input);
        std::fs::write(&input, "<svg>\n<title>t</title>\n</svg>").unwrap();

        let optimizer = built_in(Config {
            remove_descriptive_elements: true,
            ..Config::default()
        });
        let report = optimizer.run_single(&input, &output).await.unwrap();
        assert!(report.success);
        assert_eq!(std::fs::read_to_string(output).unwrap(), "<svg></svg>");
    }
}
