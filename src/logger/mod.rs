//! Logger module
//!
//! Provides logging utilities for the shell including:
//! - Startup logging (routes, listen address)
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support
//!
//! Messages go to stdout/stderr until [`init`] installs the configured writer.

mod format;
pub mod level;
pub mod writer;

pub use format::AccessLogEntry;
pub use level::Level;

use crate::config::{Config, LoggingConfig};
use crate::router::Router;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup. Fails on an unknown
/// `logging.level` or when a log file cannot be opened.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    let max_level = config
        .level
        .parse::<Level>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    level::set_max_level(max_level);

    writer::init(
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, router: &Router) {
    write_info("======================================");
    write_info("Asset shell preview host started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Virtual origin: {}", router.origin()));
    write_info(&format!("Plain http allowed: {}", router.http_allowed()));
    for route in router.routes() {
        write_info(&format!(
            "  - {} -> {} handler",
            route.prefix(),
            route.handler().name()
        ));
    }
    write_info(&format!("Log level: {}", level::max_level()));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_info(message: &str) {
    if level::enabled(Level::Info) {
        write_info(message);
    }
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    if level::enabled(Level::Warn) {
        write_error(&format!("[WARN] {message}"));
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_shutdown() {
    write_info("\n[Shutdown] Preview host stopping, draining connections");
}
