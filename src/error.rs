//! Startup error types
//!
//! Request handling never fails past the route resolver (unsupported paths become
//! a 404), so everything here surfaces before the listener is accepting.

use thiserror::Error;

use crate::preset::PresetError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid address '{addr}': {source}")]
    Address {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
