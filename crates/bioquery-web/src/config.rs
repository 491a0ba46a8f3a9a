//! Environment-driven configuration with code defaults.

use std::net::SocketAddr;

use bioquery_common::error::{BioqueryError, Result};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
pub const DEFAULT_UPSTREAM: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub upstream_base: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("BIOQUERY_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| BioqueryError::Config(format!("invalid BIOQUERY_ADDR: {e}")))?;
        let upstream_base =
            std::env::var("BIOQUERY_UPSTREAM").unwrap_or_else(|_| DEFAULT_UPSTREAM.to_string());
        Ok(Self { bind_addr, upstream_base })
    }
}
