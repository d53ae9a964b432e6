use std::net::{Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Collection name, served under `/{collection}`.
    pub collection: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
            collection: "posts".into(),
        }
    }
}

impl ServerConfig {
    /// Bind to an OS-assigned port on localhost.
    pub fn ephemeral(collection: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
            collection: collection.into(),
        }
    }
}
