use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use vane_store::DEFAULT_STALENESS;

/// Aggregation server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,
    /// How long a record may go without a refresh before a read evicts it.
    pub staleness: Duration,
    /// When set, the record is persisted to this file and survives restarts;
    /// otherwise the slot lives in memory only.
    pub data_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 4567)),
            staleness: DEFAULT_STALENESS,
            data_path: None,
        }
    }
}
