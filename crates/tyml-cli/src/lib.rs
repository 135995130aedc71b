//! # tyml-cli: Command-Line Surface for tyml
//!
//! Thin wrapper over `tyml-core` and `tyml-schema`: file loading, output
//! rendering and exit codes. No schema logic lives here.
//!
//! ## Subcommands
//!
//! - `tyml defaults`: print the default data values of a schema.
//! - `tyml check`: complete and check data-values files against a schema.
//!
//! ```bash
//! tyml defaults --schema schema.yml
//! tyml check --enable-schema --schema schema.yml --values prod.yml --output json
//! ```

pub mod check;
pub mod defaults;

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use tyml_core::DocumentSet;

/// Output encoding for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Read and parse a (possibly multi-document) YAML file.
pub fn load_documents(path: &Path) -> Result<DocumentSet> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path.display().to_string();
    let set = DocumentSet::from_yaml_str(&src, Some(&name))
        .with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(file = %name, documents = set.items.len(), "loaded YAML file");
    Ok(set)
}

/// Serialize `value` in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).context("failed to render YAML"),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(value).context("failed to render JSON")?;
            out.push('\n');
            Ok(out)
        }
    }
}
