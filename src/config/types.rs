// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Preview host configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
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
    pub max_connections: Option<u64>,
}

/// Asset routing configuration
///
/// The virtual origin itself is fixed at compile time; only the handlers
/// behind it can be changed here.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AssetsConfig {
    /// Serve `/assets/` from this directory instead of the embedded bundle
    #[serde(default)]
    pub dir: Option<String>,
    /// Extra directory routes under the virtual origin
    #[serde(default)]
    pub routes: Vec<DirRoute>,
}

/// A path prefix served from a directory on disk
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DirRoute {
    pub prefix: String,
    pub dir: String,
}
