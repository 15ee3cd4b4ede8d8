//! logicfp — code-logic integrity checks from the command line
//!
//! Usage:
//!   logicfp check --request <json-file|-> [--config <yaml>] [--explain]
//!   logicfp fingerprint --language <tag> <file|->
//!
//! `check` accepts one request object or an array of them and prints the
//! verdict(s) as JSON on stdout. Logs go to stderr.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use logicfp::{IntegrityRequest, Language, LogicfpConfig, Pipeline};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "logicfp", about = "Logic fingerprinting and integrity checks for code submissions")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a submission against prior submissions
    Check {
        /// Path to the request JSON, or `-` for stdin
        #[arg(short, long)]
        request: String,
        /// YAML pipeline configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Include per-prior scores
        #[arg(long)]
        explain: bool,
    },
    /// Print tokens and fingerprint for one source file
    Fingerprint {
        /// Language tag (python, java, c, cpp, sql, os)
        #[arg(short, long, default_value = "")]
        language: String,
        /// Source file, or `-` for stdin
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json);

    match cli.command {
        Commands::Check {
            request,
            config,
            explain,
        } => {
            let mut cfg = match config {
                Some(path) => LogicfpConfig::from_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => LogicfpConfig::default(),
            };
            cfg.integrity.explain |= explain;
            let pipeline = Pipeline::from_config(&cfg)?;

            let input = read_input(&request)?;
            let value: serde_json::Value =
                serde_json::from_str(&input).context("request is not valid JSON")?;

            let output = if value.is_array() {
                let requests: Vec<IntegrityRequest> =
                    serde_json::from_value(value).context("invalid request array")?;
                if cfg.integrity.explain {
                    let reports: Vec<_> = requests
                        .iter()
                        .map(|r| pipeline.process_submission_report(r))
                        .collect();
                    serde_json::to_string_pretty(&reports)?
                } else {
                    serde_json::to_string_pretty(&pipeline.process_batch(&requests))?
                }
            } else {
                let request: IntegrityRequest =
                    serde_json::from_value(value).context("invalid request")?;
                if cfg.integrity.explain {
                    serde_json::to_string_pretty(&pipeline.process_submission_report(&request))?
                } else {
                    serde_json::to_string_pretty(&pipeline.process_submission(&request))?
                }
            };
            println!("{output}");
        }
        Commands::Fingerprint { language, input } => {
            let code = read_input(&input)?;
            let fp = Pipeline::default().fingerprint_source(&code, Language::from_tag(&language));
            println!("{}", serde_json::to_string_pretty(&fp)?);
        }
    }

    Ok(())
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(source).with_context(|| format!("reading {source}"))
    }
}
