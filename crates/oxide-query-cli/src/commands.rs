//! Subcommand implementations.
//!
//! Each command writes its report to the given writer and returns whether
//! every query it saw was valid. Syntax errors are part of the report, not
//! failures of the command itself.

use std::io::Write;

use clap::ValueEnum;
use tracing::{info, warn};

use oxide_query_core::Tokenizer;

/// How `parse` prints a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Canonical query text.
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Rust debug representation.
    Debug,
}

/// Whether the input held only valid queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    Invalid,
}

/// Parses `query` and prints the statement in the requested format.
///
/// A syntax error goes to `errors` instead of `out`.
pub fn parse(
    query: &str,
    format: OutputFormat,
    out: &mut impl Write,
    errors: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let stmt = match oxide_query_core::parse(query) {
        Ok(stmt) => stmt,
        Err(err) => {
            writeln!(errors, "error: {err}")?;
            return Ok(Outcome::Invalid);
        }
    };
    match format {
        OutputFormat::Text => writeln!(out, "{stmt}")?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&stmt)?)?,
        OutputFormat::Debug => writeln!(out, "{stmt:#?}")?,
    }
    Ok(Outcome::Valid)
}

/// Prints every token of `query`, one per line, with its span.
pub fn tokens(query: &str, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let mut outcome = Outcome::Valid;
    for token in Tokenizer::new(query) {
        let span = token.span.to_string();
        writeln!(out, "{span:<10} {:?} {token}", token.kind)?;
        if token.error().is_some() {
            outcome = Outcome::Invalid;
        }
    }
    Ok(outcome)
}

/// Checks one query per line, skipping blank lines and `#` comments.
pub fn check(source: &str, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let mut checked = 0;
    let mut failed = 0;
    for (index, line) in source.lines().enumerate() {
        let query = line.trim();
        if query.is_empty() || query.starts_with('#') {
            continue;
        }
        checked += 1;
        let line_number = index + 1;
        match oxide_query_core::parse(query) {
            Ok(_) => writeln!(out, "{line_number}: ok")?,
            Err(err) => {
                failed += 1;
                warn!(line = line_number, %err, "invalid query");
                writeln!(out, "{line_number}: {err}")?;
            }
        }
    }
    info!(checked, failed, "check finished");
    Ok(if failed == 0 {
        Outcome::Valid
    } else {
        Outcome::Invalid
    })
}
