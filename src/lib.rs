//! PHP install-script preset server
//!
//! Serves bundled shell install scripts over a handful of fixed HTTP paths,
//! optionally rewriting the default PHP version inside the shared template.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod preset;
pub mod routing;
pub mod server;
