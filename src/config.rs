use std::{
    env,
    net::{IpAddr, SocketAddr},
};

use anyhow::Context;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// Process settings read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        Self::from_parts(
            database_url,
            env::var("APP_HOST").ok(),
            env::var("APP_PORT").ok(),
        )
    }

    /// Builds a config from raw values; unset host and port take their defaults,
    /// but a value that is set and unparsable is an error.
    pub fn from_parts(
        database_url: String,
        host: Option<String>,
        port: Option<String>,
    ) -> anyhow::Result<Self> {
        let host = match host {
            Some(raw) => raw
                .parse::<IpAddr>()
                .with_context(|| format!("APP_HOST is not an IP address: {raw}"))?,
            None => DEFAULT_HOST.parse()?,
        };
        let port = match port {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("APP_PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
