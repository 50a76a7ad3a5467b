//! # SVG Minifier - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing` (su stderr)
//! - Fusione di file di configurazione e flag CLI
//! - Scelta della modalità: cartella (batch) o singolo file
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose)
//! 3. Carica la configurazione e applica i flag
//! 4. Singolo file: `hero.svg` → `hero.min.svg`
//! 5. Cartella: `icons/` → `icons_minified/` (la cartella viene creata se manca)
//!
//! ## Esempio di utilizzo:
//! ```bash
//! svg-minifier ./icons --rename-ids --workers 8 --verbose
//! svg-minifier hero.svg --unreadable -o dist/hero.svg
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use svg_minifier::file_manager::FileManager;
use svg_minifier::json_output::JsonMessage;
use svg_minifier::{BatchOptimizer, Config, MinifyError};

#[derive(Parser)]
#[command(name = "svg-minifier")]
#[command(about = "Minify SVG files: strip metadata and comments, compact CSS and paths, optionally rename ids")]
struct Args {
    /// SVG file or folder containing SVG files
    input: PathBuf,

    /// Output folder (batch mode) or output file (single-file mode)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep <metadata> elements
    #[arg(long)]
    keep_metadata: bool,

    /// Remove <title> and <desc> elements
    #[arg(long)]
    remove_descriptive: bool,

    /// Rename ids and classes to short aliases
    #[arg(long)]
    rename_ids: bool,

    /// Single-line output (implies --rename-ids)
    #[arg(long)]
    unreadable: bool,

    /// Never use scour, even if installed
    #[arg(long)]
    no_external: bool,

    /// Number of parallel workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Dry run - don't write any file
    #[arg(long)]
    dry_run: bool,

    /// Output progress as JSON lines on stdout
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Flags override the configuration file
    fn apply_to(&self, config: &mut Config) {
        if self.keep_metadata {
            config.remove_metadata = false;
        }
        if self.remove_descriptive {
            config.remove_descriptive_elements = true;
        }
        if self.rename_ids || self.unreadable {
            config.rename_identifiers = true;
        }
        if self.unreadable {
            config.make_unreadable = true;
        }
        if self.no_external {
            config.use_external_optimizer = false;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.json {
            config.json_output = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for JSON events
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let json_output = args.json;
    let result = tokio::select! {
        result = run(args) => result,
        _ = tokio::signal::ctrl_c() => Err(anyhow::anyhow!("Interrupted by user")),
    };

    if let Err(ref e) = result {
        if json_output {
            JsonMessage::error(e.to_string(), e.chain().nth(1).map(|cause| cause.to_string())).emit();
        }
    }

    result
}

async fn run(args: Args) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => Config::from_file(path).await?,
        None => Config::default(),
    };
    args.apply_to(&mut config);

    let is_single_file = args.input.is_file()
        || (!args.input.exists() && FileManager::is_svg(&args.input));

    if is_single_file {
        if !args.input.exists() {
            return Err(MinifyError::InputNotFound(args.input).into());
        }

        let output = args
            .output
            .clone()
            .unwrap_or_else(|| FileManager::default_output_file(&args.input));
        let optimizer = BatchOptimizer::new(config)?;
        let report = optimizer.run_single(&args.input, &output).await?;
        if report.success && !optimizer.config().dry_run {
            info!("Wrote {}", report.output_path.display());
        }
        return Ok(());
    }

    if !args.input.exists() {
        tokio::fs::create_dir_all(&args.input).await?;
        error!("{}", MinifyError::InputNotFound(args.input.clone()));
        info!(
            "Created {}: put your SVG files there and run again",
            args.input.display()
        );
        return Ok(());
    }

    if args.output.is_some() {
        config.output_path = args.output.clone();
    }

    let optimizer = BatchOptimizer::new(config)?;
    optimizer.run(&args.input).await?;

    Ok(())
}
