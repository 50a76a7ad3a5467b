//! # Text Rewriting Pipeline
//!
//! Questo modulo contiene la pipeline di minificazione di un singolo documento SVG.
//!
//! ## Responsabilità:
//! - Definisce `MinifyOptions`, le opzioni di sola lettura per tutta l'esecuzione
//! - Definisce `OptimizerChoice`, risolta una volta sola per run
//! - `Minifier` applica gli stadi nell'ordine fisso: struttura → rinomina → riga singola
//!
//! ## Stadi:
//! - `structure`: commenti, metadata, `<style>`, whitespace tra tag, precisione numerica
//! - `identifiers`: alias brevi per `id` e `class` con riferimenti coerenti
//! - `line`: compattazione su una sola riga
//!
//! Ogni stadio è una funzione totale `&str -> String` e non condivide stato.

pub mod css;
pub mod identifiers;
pub mod line;
pub mod markup;
pub mod number;
pub mod path_data;
pub mod structure;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::MinifyError;
use crate::external::ExternalOptimizer;

/// Options shared by every document of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinifyOptions {
    pub remove_metadata: bool,
    pub remove_descriptive_elements: bool,
    pub rename_identifiers: bool,
    pub make_unreadable: bool,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            remove_metadata: true,
            remove_descriptive_elements: false,
            rename_identifiers: false,
            make_unreadable: false,
        }
    }
}

impl From<&Config> for MinifyOptions {
    fn from(config: &Config) -> Self {
        Self {
            remove_metadata: config.remove_metadata,
            remove_descriptive_elements: config.remove_descriptive_elements,
            // Single-line output is only produced together with renaming.
            rename_identifiers: config.rename_identifiers || config.make_unreadable,
            make_unreadable: config.make_unreadable,
        }
    }
}

/// Which structural optimizer handles the first stage.
#[derive(Clone)]
pub enum OptimizerChoice {
    External(Arc<dyn ExternalOptimizer>),
    BuiltIn,
}

impl fmt::Debug for OptimizerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizerChoice::External(optimizer) => write!(f, "External({})", optimizer.name()),
            OptimizerChoice::BuiltIn => write!(f, "BuiltIn"),
        }
    }
}

/// Per-document pipeline.
#[derive(Debug, Clone)]
pub struct Minifier {
    options: MinifyOptions,
    choice: OptimizerChoice,
}

impl Minifier {
    pub fn new(options: MinifyOptions, choice: OptimizerChoice) -> Self {
        Self { options, choice }
    }

    /// Pipeline that only uses the built-in stages.
    pub fn built_in(options: MinifyOptions) -> Self {
        Self::new(options, OptimizerChoice::BuiltIn)
    }

    pub fn options(&self) -> &MinifyOptions {
        &self.options
    }

    pub fn choice(&self) -> &OptimizerChoice {
        &self.choice
    }

    /// Minify one document.
    ///
    /// ```
    /// use svg_minifier::pipeline::{Minifier, MinifyOptions};
    ///
    /// let minifier = Minifier::built_in(MinifyOptions::default());
    /// let out = minifier.minify("<svg>\n  <!-- c -->\n  <rect x=\"1.000\"/>\n</svg>").unwrap();
    /// assert_eq!(out, "<svg><rect x=\"1\"/></svg>");
    /// ```
    pub fn minify(&self, document: &str) -> Result<String, MinifyError> {
        if !has_svg_root(document) {
            return Err(MinifyError::NotSvg);
        }

        let mut result = self.structural_pass(document);

        if self.options.rename_identifiers {
            let outcome = identifiers::rename_identifiers(&result);
            debug!(
                "Renamed {} ids and {} classes",
                outcome.ids_renamed, outcome.classes_renamed
            );
            result = outcome.document;
        }

        if self.options.make_unreadable {
            result = line::compact_lines(&result);
        }

        Ok(result)
    }

    fn structural_pass(&self, document: &str) -> String {
        if let OptimizerChoice::External(optimizer) = &self.choice {
            match optimizer.optimize(document, &self.options) {
                Ok(Some(optimized)) => {
                    debug!("Structural pass done by {}", optimizer.name());
                    return structure::strip_style_comments(&optimized);
                }
                Ok(None) => {
                    warn!("{} not available, using built-in minifier", optimizer.name());
                }
                Err(e) => {
                    warn!("{} failed ({}), using built-in minifier", optimizer.name(), e);
                }
            }
        }
        structure::strip_structure(document, &self.options)
    }
}

/// Whether the document has an `<svg>` start tag (prefixed or not).
fn has_svg_root(document: &str) -> bool {
    markup::segments(document).any(|segment| match segment {
        markup::Segment::StartTag(raw) => markup::local_name(markup::tag_name(raw)) == "svg",
        _ => false,
    })
}
