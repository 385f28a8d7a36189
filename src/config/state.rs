// Application state module
// Shared, read-only state handed to every connection task

use std::sync::Arc;

use super::types::Config;
use crate::error::ShellError;
use crate::interceptor::Interceptor;

/// Application state
///
/// Built once before the listener starts accepting; never mutated afterwards.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub interceptor: Arc<Interceptor>,
}

impl AppState {
    /// Build the route table from `config` and wrap it in an interceptor
    pub fn new(config: Config) -> Result<Self, ShellError> {
        let router = config.build_router()?;
        Ok(Self {
            config,
            interceptor: Arc::new(Interceptor::new(router)),
        })
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
