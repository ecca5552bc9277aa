//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::api::DEFAULT_API_URL;
use crate::error::Error;

/// Runtime settings. Every flag can also be set through its environment
/// variable; the flag wins when both are present.
#[derive(Clone, Debug, Parser)]
#[command(name = "groupie-tracker", version, about = "Browse the groupie tracker artist API")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "GROUPIE_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: String,

    /// Root URL of the upstream artist API.
    #[arg(long, env = "GROUPIE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout for upstream calls, in seconds.
    #[arg(long, env = "GROUPIE_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Config {
    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        self.addr.parse().map_err(|source| Error::InvalidAddr {
            addr: self.addr.clone(),
            source,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
