//! # Check Subcommand
//!
//! Selects the schema policy, then completes and checks every document of
//! every values file against it. Each checked document is reported with
//! its completed values and its violations.
//!
//! Without values files, an empty document is checked, which reports the
//! schema defaults as the completed values.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tyml_core::{Document, TypeCheck};
use tyml_schema::{select_schema, Schema, SchemaConfig};

use crate::{load_documents, render, OutputFormat};

/// Shown after `tyml check --help`.
pub const POSITION_NOTE: &str = "Positions in violations name the source file only: the YAML \
loader does not track line numbers. Violations name the offending key (map item 'port') or \
element kind (array item) instead.";

/// Arguments for the `tyml check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema file. Without it an enabled schema feature accepts no values
    /// files.
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Data-values file to check. Repeatable.
    #[arg(long = "values", value_name = "FILE")]
    pub values: Vec<PathBuf>,

    /// Enable the schema feature (overrides TYML_SCHEMA_ENABLED).
    #[arg(long)]
    pub enable_schema: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

/// Result of checking one document. Violation positions carry the file
/// name only.
#[derive(Debug, Serialize)]
pub struct DocumentReport {
    /// File the document came from.
    pub source: String,
    /// Zero-based index of the document within its file.
    pub index: usize,
    /// The document after completion with schema defaults.
    pub values: serde_yaml::Value,
    pub violations: TypeCheck,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 when every document is clean, 1 when any violation
/// was reported. Operational failures are errors.
pub fn run_check(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let config = if args.enable_schema {
        SchemaConfig::enabled()
    } else {
        SchemaConfig::from_env().context("invalid schema configuration")?
    };

    let schema_documents = match &args.schema {
        Some(path) => load_documents(path)?.items,
        None => Vec::new(),
    };
    let schema = select_schema(&config, schema_documents).context("failed to load schema")?;
    schema.validate_with_values(args.values.len())?;

    let reports = check_values(schema.as_ref(), &args.values)?;
    let violations: usize = reports.iter().map(|r| r.violations.len()).sum();
    tracing::info!(
        documents = reports.len(),
        violations,
        "checked data values"
    );

    out.write_all(render(&reports, args.output)?.as_bytes())?;
    Ok(if violations > 0 { 1 } else { 0 })
}

fn check_values(schema: &dyn Schema, paths: &[PathBuf]) -> Result<Vec<DocumentReport>> {
    if paths.is_empty() {
        return Ok(vec![check_document(schema, "<defaults>", 0, Document::empty())]);
    }

    let mut reports = Vec::new();
    for path in paths {
        let source = path.display().to_string();
        for (index, doc) in load_documents(path)?.items.into_iter().enumerate() {
            reports.push(check_document(schema, &source, index, doc));
        }
    }
    Ok(reports)
}

fn check_document(
    schema: &dyn Schema,
    source: &str,
    index: usize,
    mut doc: Document,
) -> DocumentReport {
    let violations = schema.assign_type(&mut doc);
    for violation in violations.violations() {
        tracing::warn!(source, index, "{violation}");
    }
    DocumentReport {
        source: source.to_string(),
        index,
        values: doc.to_yaml(),
        violations,
    }
}
