use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use commands::{generate_data, serve};

#[derive(Parser)]
#[command(name = "cashcast")]
#[command(about = "Cash-flow dashboard backend with a balance forecast endpoint")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    ///
    /// Settings come from defaults, an optional cashcast.toml and CASHCAST_*
    /// environment variables. The flags below override all of them.
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:5000, 127.0.0.1:8080)
        #[arg(short, long)]
        bind_address: Option<String>,

        /// Path to the transaction dataset (JSON export)
        #[arg(short, long)]
        data_file: Option<PathBuf>,
    },
    /// Write a mock transaction dataset
    ///
    /// Generates a JSON export with a consistent running balance that the
    /// server can load as its dataset.
    GenerateData {
        /// Where to write the dataset
        #[arg(short, long, default_value = "mock_transactions.json")]
        output: PathBuf,

        /// Number of transactions to generate
        #[arg(short, long, default_value_t = 200)]
        count: usize,

        /// Seed for a reproducible dataset
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                bind_address,
                data_file,
            } => {
                serve(bind_address, data_file).await?;
            }
            Commands::GenerateData {
                output,
                count,
                seed,
            } => {
                generate_data(&output, count, seed).await?;
            }
        }
        Ok(())
    }
}
