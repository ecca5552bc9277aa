use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use groupie_tracker::{ApiClient, AppState, Config, Error, Server};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        api = %config.api_url,
        timeout_secs = config.timeout_secs,
        "starting groupie-tracker"
    );

    let api = ApiClient::new(&config.api_url, config.timeout())?;
    Server::bind(config.socket_addr()?)
        .serve(groupie_tracker::app(), AppState::new(api))
        .await
}
