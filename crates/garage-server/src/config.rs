use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use garage_core::AppError;

const DEFAULT_PORT: u16 = 3000;

/// Listen address for the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
        }
    }
}

impl ServerConfig {
    /// Read `GARAGE_SERVER_HOST` (default `0.0.0.0`) and `GARAGE_SERVER_PORT`
    /// (default 3000).
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(
            std::env::var("GARAGE_SERVER_HOST").ok().as_deref(),
            std::env::var("GARAGE_SERVER_PORT").ok().as_deref(),
        )
    }

    fn from_vars(host: Option<&str>, port: Option<&str>) -> Result<Self, AppError> {
        let mut addr = Self::default().addr;
        if let Some(raw) = host {
            let ip: IpAddr = raw.trim().parse().map_err(|_| {
                AppError::ConfigError(format!("Invalid GARAGE_SERVER_HOST '{raw}'"))
            })?;
            addr.set_ip(ip);
        }
        if let Some(raw) = port {
            let port: u16 = raw.trim().parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid GARAGE_SERVER_PORT '{raw}': must be 0-65535"
                ))
            })?;
            addr.set_port(port);
        }
        Ok(Self { addr })
    }
}
