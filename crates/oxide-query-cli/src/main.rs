//! oxide-query CLI
//!
//! Command-line tool for parsing and checking `select` queries.

mod commands;

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use commands::{Outcome, OutputFormat};

/// Parse and check queries in the oxide-query language.
#[derive(Parser)]
#[command(name = "oxide-query")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log every token and parser state.
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one query and print the statement.
    Parse {
        /// The query (read from stdin if not given).
        query: Option<String>,

        /// Output format.
        #[arg(short, long, env = "OXIDE_QUERY_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the token stream of one query.
    Tokens {
        /// The query (read from stdin if not given).
        query: Option<String>,
    },

    /// Check a file holding one query per line.
    Check {
        /// The file to check (stdin if not given).
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.trace {
        Level::TRACE
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut stdout = io::stdout().lock();
    let outcome = match cli.command {
        Commands::Parse { query, format } => {
            let query = query_or_stdin(query)?;
            commands::parse(&query, format, &mut stdout, &mut io::stderr())?
        }
        Commands::Tokens { query } => {
            let query = query_or_stdin(query)?;
            commands::tokens(&query, &mut stdout)?
        }
        Commands::Check { file } => {
            let source = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => read_stdin()?,
            };
            commands::check(&source, &mut stdout)?
        }
    };

    debug!(?outcome, "done");
    Ok(match outcome {
        Outcome::Valid => ExitCode::SUCCESS,
        Outcome::Invalid => ExitCode::FAILURE,
    })
}

fn query_or_stdin(query: Option<String>) -> anyhow::Result<String> {
    match query {
        Some(query) => Ok(query),
        None => Ok(read_stdin()?.trim_end().to_string()),
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    Ok(input)
}
