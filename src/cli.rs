//! Command-line argument parsing for querypipe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A demonstration SQL pipeline toolkit with mock execution and artifact
/// materialization.
#[derive(Parser, Debug)]
#[command(name = "querypipe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for generated artifacts (overrides config)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Simulated engine delay in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the materializer pipeline: execute the demo queries and write
    /// their artifacts and visualizations
    Run,

    /// Run the sequential batch pipeline with stop-on-first-failure
    Batch,

    /// Seed the demo credential bundle into the secret store
    SetupSecrets,

    /// Re-render the views for a previously saved query record
    Render {
        /// Artifact directory containing sql_query.json
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}
