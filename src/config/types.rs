// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub presets: PresetsConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level written: error, warn, info or debug
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
    /// Seconds to wait for in-flight connections after a shutdown signal
    pub shutdown_grace_period: u64,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    /// `Cache-Control` max-age for script responses, 0 disables caching
    pub cache_max_age: u32,
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}

/// Preset catalog configuration
///
/// The version lists decide which route parameters resolve; every listed
/// version and preset must have a matching asset or startup fails.
#[derive(Debug, Deserialize, Clone)]
pub struct PresetsConfig {
    /// Version token in the shared template, also what `/install.sh` installs
    #[serde(default = "default_version")]
    pub default_version: String,
    /// Versions accepted by `/{version}/install.sh`
    #[serde(default = "default_install_versions")]
    pub install_versions: Vec<String>,
    /// Versions with a dedicated script under `/version/{version}`
    #[serde(default = "default_dedicated_versions")]
    pub dedicated_versions: Vec<String>,
    /// Named presets under `/presets/{name}`
    #[serde(default = "default_named_presets")]
    pub named: Vec<String>,
    /// Load `<name>.sh` assets from this directory instead of the bundled copies
    #[serde(default)]
    pub directory: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_version() -> String {
    "8.4".to_string()
}

fn default_install_versions() -> Vec<String> {
    ["7.4", "8.1", "8.2", "8.3", "8.4"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_dedicated_versions() -> Vec<String> {
    ["7.4", "8.1", "8.2", "8.3"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_named_presets() -> Vec<String> {
    vec!["laravel".to_string()]
}

impl Default for PresetsConfig {
    fn default() -> Self {
        Self {
            default_version: default_version(),
            install_versions: default_install_versions(),
            dedicated_versions: default_dedicated_versions(),
            named: default_named_presets(),
            directory: None,
        }
    }
}
