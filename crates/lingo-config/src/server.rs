use std::net::SocketAddr;

use serde::Deserialize;

/// Message returned by the liveness route unless overridden
pub const DEFAULT_LIVENESS_MESSAGE: &str = "Python API service point is live.";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: SocketAddr,
    /// Body of the `GET /` liveness probe
    #[serde(default = "default_liveness_message")]
    pub liveness_message: String,
    /// Upper bound for JSON request bodies
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            liveness_message: default_liveness_message(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_liveness_message() -> String {
    DEFAULT_LIVENESS_MESSAGE.to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_body_limit() -> usize {
    1 << 20
}
