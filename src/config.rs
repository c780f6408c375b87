//! Environment-backed configuration.
//!
//! Read once at startup, after dotenvy has loaded any `.env` file.

use std::env;

pub const DEFAULT_FIPE_BASE_URL: &str = "https://parallelum.com.br/fipe/api/v1";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to (`BIND_ADDR`).
    pub bind_addr: String,
    /// Root of the FIPE reference API (`FIPE_BASE_URL`).
    pub fipe_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            fipe_base_url: env::var("FIPE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_FIPE_BASE_URL.to_string()),
        }
    }
}
