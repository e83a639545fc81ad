mod error;
mod input;
mod report;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use blobshare_core::{NamespaceId, ShareConfig};
use blobshare_split::{parse_compact_shares, parse_sparse_shares, SparseShareSplitter};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::error::InspectError;
use crate::input::{read_shares, write_shares};
use crate::report::describe_share;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML share layout config
    #[arg(long, short, env = "BLOBSHARE_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the decoded header fields of every share
    Inspect {
        file: PathBuf,
        /// Read one hex-encoded share per line
        #[arg(long)]
        hex: bool,
    },
    /// Reconstruct sequences (or compact units) and print them as hex
    Decode {
        file: PathBuf,
        #[arg(long)]
        hex: bool,
        /// Parse compact shares into length-delimited units
        #[arg(long)]
        compact: bool,
        /// Accepted share versions
        #[arg(long, value_delimiter = ',', default_value = "0")]
        versions: Vec<u8>,
    },
    /// Split a blob into sparse shares
    Split {
        file: PathBuf,
        /// Namespace ID as hex
        #[arg(long)]
        namespace: NamespaceId,
        #[arg(long, default_value_t = 0)]
        version: u8,
        /// Write raw shares here instead of hex lines to stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<Arc<ShareConfig>, InspectError> {
    let config = match path {
        Some(path) => {
            info!("loading share config from {}", path.display());
            ShareConfig::load(path)?
        }
        None => ShareConfig::default(),
    };
    Ok(Arc::new(config))
}

fn run(cli: Cli) -> Result<(), InspectError> {
    let config = load_config(cli.config.as_ref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Inspect { file, hex } => {
            let shares = read_shares(&file, &config, hex)?;
            for (index, share) in shares.iter().enumerate() {
                writeln!(out, "{}", describe_share(index, share))?;
            }
        }
        Commands::Decode {
            file,
            hex,
            compact,
            versions,
        } => {
            let shares = read_shares(&file, &config, hex)?;
            if compact {
                for (index, unit) in parse_compact_shares(&shares, &versions)?.iter().enumerate() {
                    writeln!(out, "unit {index} len={} {}", unit.len(), hex::encode(unit))?;
                }
            } else {
                for (index, sequence) in parse_sparse_shares(&shares, &versions)?.iter().enumerate()
                {
                    let data = sequence.raw_data()?;
                    writeln!(
                        out,
                        "sequence {index} ns={} shares={} len={} {}",
                        sequence.namespace,
                        sequence.shares.len(),
                        data.len(),
                        hex::encode(&data)
                    )?;
                }
            }
        }
        Commands::Split {
            file,
            namespace,
            version,
            out: out_path,
        } => {
            let blob = std::fs::read(&file)?;
            let mut splitter = SparseShareSplitter::new(Arc::clone(&config))?;
            splitter.write(&namespace, version, &blob)?;
            let shares = splitter.export();
            info!("split {} bytes into {} shares", blob.len(), shares.len());
            match out_path {
                Some(path) => {
                    let mut file = std::fs::File::create(path)?;
                    write_shares(&mut file, &shares, false)?;
                }
                None => write_shares(&mut out, &shares, true)?,
            }
        }
    }
    Ok(())
}

fn main() {
    let filter = std::env::var("BLOBSHARE_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("{err}");
        std::process::exit(1);
    }
}
