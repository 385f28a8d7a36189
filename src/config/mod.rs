// Configuration module entry point
// Loads host configuration and turns it into the route table

mod state;
mod types;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ShellError;
use crate::handler::{DirectoryHandler, EmbeddedAssetsHandler, PathHandler};
use crate::origin::{VirtualOrigin, ASSETS_PATH};
use crate::router::Router;

// Re-export public types
pub use state::AppState;
pub use types::{AssetsConfig, Config, DirRoute, LoggingConfig, PerformanceConfig, ServerConfig};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "appassets";

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

impl Config {
    /// Load configuration from `appassets.toml` and `SHELL_*` variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional. Environment variables use `__` between levels,
    /// e.g. `SHELL_SERVER__PORT=9000`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SHELL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Parse configuration from TOML text on top of the defaults
    pub fn from_toml(text: &str) -> Result<Self, config::ConfigError> {
        with_defaults(config::Config::builder())?
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Build the virtual-origin route table
    ///
    /// `/assets/` is always registered, backed by the embedded bundle unless
    /// `assets.dir` overrides it. Duplicate or malformed prefixes fail here,
    /// before any request is served.
    pub fn build_router(&self) -> Result<Router, ShellError> {
        let assets: Arc<dyn PathHandler> = match &self.assets.dir {
            Some(dir) => Arc::new(open_dir(dir)?),
            None => Arc::new(EmbeddedAssetsHandler::new()),
        };

        let mut builder = Router::builder(VirtualOrigin::appassets())
            .http_allowed(true)
            .add_shared_handler(ASSETS_PATH, assets);

        for route in &self.assets.routes {
            builder = builder.add_path_handler(route.prefix.clone(), open_dir(&route.dir)?);
        }

        Ok(builder.build()?)
    }
}

fn with_defaults(builder: Builder) -> Result<Builder, config::ConfigError> {
    builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("logging.level", "info")?
        .set_default("logging.access_log", true)?
        .set_default("logging.access_log_format", "combined")?
        .set_default("performance.keep_alive_timeout", 75)?
        .set_default("performance.read_timeout", 30)?
        .set_default("performance.write_timeout", 30)
}

fn open_dir(dir: &str) -> Result<DirectoryHandler, ShellError> {
    DirectoryHandler::new(dir).map_err(|source| ShellError::AssetDir {
        path: PathBuf::from(dir),
        source,
    })
}
