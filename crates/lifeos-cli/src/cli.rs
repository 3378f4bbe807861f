use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lifeos")]
#[command(about = "Life OS AI Skills - task documentation, skills and metrics", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the data store
    #[arg(long, env = "LIFEOS_STORE_URL", hide_env_values = true)]
    pub store_url: String,

    /// Service key for the data store
    #[arg(long, env = "LIFEOS_STORE_KEY", hide_env_values = true)]
    pub store_key: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "LIFEOS_STORE_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a metrics snapshot
    Metrics {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List tasks not yet analyzed for patterns
    Tasks {
        /// Maximum number of task rows to read
        #[arg(long, default_value = "50")]
        limit: usize,

        /// Include tasks already analyzed
        #[arg(long)]
        all: bool,
    },

    /// List active skills
    Skills,

    /// Save a task document read from a JSON file
    SaveTask {
        #[arg(long)]
        file: PathBuf,
    },

    /// Save a skill read from a JSON file
    SaveSkill {
        #[arg(long)]
        file: PathBuf,
    },
}
