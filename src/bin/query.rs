//! Occurrence Query Binary
//!
//! Interactive shell over the occurrence table and model directory.

use anyhow::Context;
use biodiversity::api::API;
use biodiversity::cli::CLI;
use biodiversity::occurrence::Loader;
use biodiversity::server::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    biodiversity::log()?;
    biodiversity::kys();
    let config = Config::parse();
    let loader = Loader::new(&config.data);
    let api = API::open(&loader, &config.models)
        .with_context(|| format!("load occurrences from {}", config.data.display()))?;
    CLI::from(api).run().await
}
