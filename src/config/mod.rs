//! Service-level configuration.
//!
//! Shared configuration types live in `feedesk_config` and are re-exported
//! here.

use std::env;
use std::net::SocketAddr;

pub use feedesk_config::{AccessConfig, CorsConfig, JwtConfig};

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Reads `SERVER_ADDR`. An unparsable value is an error rather than a
    /// silent fallback.
    pub fn from_env() -> anyhow::Result<Self> {
        let raw = env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());
        let addr = raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid SERVER_ADDR {raw:?}: {e}"))?;
        Ok(Self { addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addr_parses() {
        let addr: SocketAddr = DEFAULT_SERVER_ADDR.parse().unwrap();
        assert_eq!(addr.port(), 3000);
    }
}
