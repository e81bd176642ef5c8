//! kvshelf server binary.

use server::{CliArgs, StoreServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse_args();
    let config = args.load_config()?;

    StoreServer::new(config).run().await
}
