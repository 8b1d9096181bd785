use clap::Parser;
use std::path::PathBuf;

/// Runtime configuration, from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Species occurrence query and prediction server", long_about = None)]
pub struct Config {
    /// Occurrence table (CSV with header)
    #[arg(long, env = "DATA_PATH", default_value = "../data/processed/occurrences_clean.csv")]
    pub data: PathBuf,
    /// Directory holding per-species model artifacts
    #[arg(long, env = "MODELS_DIR", default_value = "../models")]
    pub models: PathBuf,
    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    pub bind: String,
    /// HTTP worker threads
    #[arg(long, env = "WORKERS", default_value_t = 6)]
    pub workers: usize,
}
