//! # External Optimizer
//!
//! Structural optimization delegated to a command-line tool. The tool is a
//! capability chosen once per run: when it is missing or fails, the pipeline
//! falls back to the built-in structural stripper.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use tracing::{debug, info};

use crate::args;
use crate::error::MinifyError;
use crate::pipeline::{MinifyOptions, OptimizerChoice};
use crate::tool_resolver::ToolPathResolver;

/// A structural optimizer living outside this crate.
pub trait ExternalOptimizer: Send + Sync {
    fn name(&self) -> &str;

    /// Optimize `document`.
    ///
    /// `Ok(None)` means the optimizer is not available; `Err` means it ran and
    /// failed. Either way the caller uses the built-in stripper instead.
    fn optimize(&self, document: &str, options: &MinifyOptions) -> Result<Option<String>, MinifyError>;
}

/// The `scour` SVG optimizer.
#[derive(Debug, Clone)]
pub struct ScourOptimizer {
    path: PathBuf,
}

impl ScourOptimizer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate `scour` with the given resolver, or explain how to install it.
    pub fn detect(resolver: &ToolPathResolver) -> Result<Self, String> {
        resolver.check_tool_with_instructions("scour").map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn build_args(input: &Path, options: &MinifyOptions) -> Vec<String> {
        let mut args = args![
            "-i",
            input.display(),
            "--enable-comment-stripping",
            "--strip-xml-prolog",
            "--enable-viewboxing",
            "--indent=none",
            "--no-line-breaks",
            "--strip-xml-space",
            "--protect-ids-noninkscape",
            "--quiet",
        ];
        if options.remove_metadata {
            args.push("--remove-metadata".to_string());
        }
        if options.remove_descriptive_elements {
            args.push("--remove-descriptive-elements".to_string());
        }
        args
    }
}

impl ExternalOptimizer for ScourOptimizer {
    fn name(&self) -> &str {
        "scour"
    }

    fn optimize(&self, document: &str, options: &MinifyOptions) -> Result<Option<String>, MinifyError> {
        let mut input = tempfile::Builder::new()
            .prefix("svg-minifier-")
            .suffix(".svg")
            .tempfile()?;
        input.write_all(document.as_bytes())?;
        input.flush()?;

        let args = Self::build_args(input.path(), options);
        debug!("Running {:?} {:?}", self.path, args);

        let start_time = std::time::Instant::now();
        let output = match Command::new(&self.path).args(&args).output() {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let elapsed = start_time.elapsed();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MinifyError::ExternalOptimizer(format!(
                "scour exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let optimized = String::from_utf8(output.stdout)
            .map_err(|_| MinifyError::ExternalOptimizer("scour produced non UTF-8 output".to_string()))?;
        if optimized.trim().is_empty() {
            return Err(MinifyError::ExternalOptimizer("scour produced no output".to_string()));
        }

        debug!("scour finished in {:?}", elapsed);
        Ok(Some(optimized))
    }
}

/// Decide once per run which structural optimizer to use.
pub fn resolve_optimizer(use_external: bool, resolver: &ToolPathResolver) -> OptimizerChoice {
    if !use_external {
        info!("External optimizer disabled, using built-in minifier");
        return OptimizerChoice::BuiltIn;
    }

    match ScourOptimizer::detect(resolver) {
        Ok(scour) => {
            info!("Using scour at {}", scour.path().display());
            OptimizerChoice::External(Arc::new(scour))
        }
        Err(hint) => {
            info!("scour not found, using built-in minifier");
            info!("[TIP] {}", hint);
            OptimizerChoice::BuiltIn
        }
    }
}
