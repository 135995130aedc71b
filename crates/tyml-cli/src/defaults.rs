//! # Defaults Subcommand
//!
//! Compiles a schema file and prints its default data values: every
//! declared key with its schema literal, every array empty.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use tyml_schema::{select_schema, SchemaConfig};

use crate::{load_documents, render, OutputFormat};

/// Arguments for the `tyml defaults` subcommand.
#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// Schema file (exactly one YAML document).
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

/// Execute the defaults subcommand.
///
/// Returns exit code 0; malformed schemas are errors.
pub fn run_defaults(args: &DefaultsArgs, out: &mut impl Write) -> Result<u8> {
    let documents = load_documents(&args.schema)?.items;
    let schema = select_schema(&SchemaConfig::enabled(), documents)
        .with_context(|| format!("invalid schema {}", args.schema.display()))?;

    let Some(values) = schema.as_data_values() else {
        bail!("no schema document in {}", args.schema.display());
    };
    out.write_all(render(&values.to_yaml(), args.output)?.as_bytes())?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_file(src: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(src.as_bytes()).unwrap();
        file
    }

    fn run(src: &str, output: OutputFormat) -> Result<String> {
        let file = schema_file(src);
        let args = DefaultsArgs {
            schema: file.path().to_path_buf(),
            output,
        };
        let mut out = Vec::new();
        let code = run_defaults(&args, &mut out)?;
        assert_eq!(code, 0);
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn prints_defaults_with_empty_arrays() {
        let printed = run("name: app\nports: [80]\n", OutputFormat::Yaml).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&printed).unwrap();
        let expected: serde_yaml::Value = serde_yaml::from_str("name: app\nports: []\n").unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn prints_json() {
        let printed = run("replicas: 2\n", OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(parsed, serde_json::json!({ "replicas": 2 }));
    }

    #[test]
    fn malformed_schema_is_an_error() {
        let err = run("ports: []\n", OutputFormat::Yaml).unwrap_err();
        assert!(format!("{err:#}").contains("expected one item in array"));
    }

    #[test]
    fn several_schema_documents_are_an_error() {
        let err = run("a: 1\n---\nb: 2\n", OutputFormat::Yaml).unwrap_err();
        assert!(format!("{err:#}").contains("found 2"));
    }
}
