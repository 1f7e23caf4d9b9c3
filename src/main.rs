use clap::Parser;
use offer_rotator::config::Cli;
use offer_rotator::error::ServiceError;
use offer_rotator::lifecycle::{setup_tracing, shutdown_signal, OfferServer};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    setup_tracing();

    let config = Cli::parse().into_config()?;
    info!(?config, "Starting offer service");

    let server = OfferServer::bind(config).await?;
    server
        .run(async {
            if let Err(e) = shutdown_signal().await {
                error!(error = %e, "Signal handling failed, shutting down");
            }
        })
        .await
}
