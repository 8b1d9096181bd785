//! Occurrence Server Binary
//!
//! Loads the occurrence table and serves the query and prediction API over HTTP.

use biodiversity::server::Config;
use biodiversity::server::Server;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    biodiversity::log()?;
    biodiversity::kys();
    Server::run(Config::parse()).await
}
