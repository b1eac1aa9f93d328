//! API gateway configuration.
//!
//! For now this only configures the HTTP listen address; the underlying
//! pipeline configuration is taken from `pipeline::PipelineConfig`, with
//! the registry URL overridable via `REGISTRY_URL`.

use std::net::SocketAddr;

/// Configuration for the API gateway HTTP server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP server to.
    pub listen_addr: SocketAddr,
}

impl Default for ApiConfig {
    fn default() -> Self {
        // Bind to all interfaces so a container port mapping is reachable
        // from the host.
        let addr: SocketAddr = "0.0.0.0:8081"
            .parse()
            .expect("hard-coded API listen address should parse");
        Self { listen_addr: addr }
    }
}

impl ApiConfig {
    /// Builds a config from the environment, falling back to defaults.
    ///
    /// `LISTEN_ADDR` overrides the bind address when set and valid.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(raw) = std::env::var("LISTEN_ADDR") {
            match raw.parse() {
                Ok(addr) => cfg.listen_addr = addr,
                Err(e) => tracing::warn!("ignoring invalid LISTEN_ADDR {raw:?}: {e}"),
            }
        }
        cfg
    }
}
