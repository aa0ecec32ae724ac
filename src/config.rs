use std::net::{IpAddr, SocketAddr};

use anyhow::Context;

pub const DEFAULT_PORT: u16 = 5001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    /// Reads `BIND_ADDR`, `PORT` and `LOG_LEVEL`, honoring a `.env` file.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("BIND_ADDR") {
            let ip: IpAddr = host.parse()
                .with_context(|| format!("BIND_ADDR {host:?} is not an ip address"))?;
            config.bind_addr.set_ip(ip);
        }
        if let Some(port) = lookup("PORT") {
            let port: u16 = port.parse()
                .with_context(|| format!("PORT {port:?} is not a port number"))?;
            config.bind_addr.set_port(port);
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }
}
