// Configuration module entry point
// Loads layered configuration (defaults, config file, environment) and holds runtime state

mod state;
mod types;

use std::net::SocketAddr;

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig, PresetsConfig,
    ServerConfig,
};

/// Environment variable prefix, e.g. `PRESET_SERVER__PORT=9000`
///
/// Values stay strings until deserialized so version labels like `8.30` are
/// not reparsed as floats.
const ENV_PREFIX: &str = "PRESET";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, ServerError> {
        let settings = Self::defaults()?
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from an in-memory TOML document layered over the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, ServerError> {
        let settings = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_grace_period", 10)?
            .set_default("http.server_name", "php-preset-server")?
            .set_default("http.enable_cors", false)?
            .set_default("http.cache_max_age", 300)
    }

    /// Reject combinations the preset store cannot honor
    fn validate(&self) -> Result<(), ServerError> {
        let presets = &self.presets;
        if presets.default_version.is_empty() {
            return Err(ServerError::InvalidConfig(
                "presets.default_version must not be empty".to_string(),
            ));
        }
        if !presets.install_versions.contains(&presets.default_version) {
            return Err(ServerError::InvalidConfig(format!(
                "presets.default_version '{}' is not listed in presets.install_versions",
                presets.default_version
            )));
        }
        if self.logging.level.parse::<crate::logger::Level>().is_err() {
            return Err(ServerError::InvalidConfig(format!(
                "logging.level '{}' is not one of error, warn, info, debug",
                self.logging.level
            )));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ServerError::Address { addr, source })
    }
}
