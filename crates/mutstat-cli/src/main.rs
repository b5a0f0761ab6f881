mod error;
mod report;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mutstat_core::codec;
use mutstat_core::impls::TracingStatsSink;
use mutstat_core::{SinkConfig, StatsRecorder};

use crate::error::CliError;
use crate::report::{compute_report, decode_session_stats, merge_report};

/// Workflow mutable state size statistics.
#[derive(Parser)]
#[command(name = "mutstat", version, about = "Workflow mutable state size statistics")]
struct Cli {
    /// Sink thresholds (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Log every recorded measurement (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute stats for a persisted request (get / create / update / conflict_resolve)
    Compute {
        /// Path to the request JSON
        file: PathBuf,
        /// Domain name attached to the recorded measurement
        #[arg(long)]
        domain: Option<String>,
    },

    /// Merge session stats emitted by earlier `compute` runs
    Merge {
        /// Session stats or report JSON files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_config(path: Option<&Path>) -> Result<SinkConfig, CliError> {
    let Some(path) = path else {
        return Ok(SinkConfig::default());
    };
    let bytes = read(path)?;
    codec::decode(&bytes).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn run(cli: Cli) -> Result<String, CliError> {
    let report = match cli.command {
        Commands::Compute { file, domain } => {
            let config = load_config(cli.config.as_deref())?;
            let recorder = StatsRecorder::new(TracingStatsSink::new(config));

            let bytes = read(&file)?;
            let request = codec::decode_request(&bytes).map_err(|source| CliError::Input {
                path: file.clone(),
                source: source.into(),
            })?;
            tracing::info!(path = %file.display(), op = %request.op(), "computing stats");
            compute_report(&recorder, &request, domain.as_deref())
        }
        Commands::Merge { files } => {
            let mut inputs = Vec::with_capacity(files.len());
            for file in &files {
                let bytes = read(file)?;
                let stats = decode_session_stats(&bytes).map_err(|source| CliError::Input {
                    path: file.clone(),
                    source,
                })?;
                inputs.push(stats);
            }
            tracing::info!(count = inputs.len(), "merging session stats");
            merge_report(inputs)
        }
    };

    Ok(codec::encode(&report, cli.pretty)?)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
