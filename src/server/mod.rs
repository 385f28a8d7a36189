// Server module entry point
// Runs the preview host: accept loop, connection handling and shutdown

pub mod connection;
pub mod listener;
pub mod preview;
pub mod signal;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;

// Re-export commonly used items
pub use listener::create_reusable_listener;
pub use preview::handle_request;

/// How often the drain loop re-checks the connection counter
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept connections until SIGTERM/SIGINT, then drain
///
/// After the signal the listener is closed and in-flight connections get up
/// to `performance.write_timeout` seconds to finish before this returns and
/// the runtime is dropped.
pub async fn run(listener: TcpListener, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));
    let shutdown = Arc::new(Notify::new());
    signal::start_signal_handler(Arc::clone(&shutdown));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown();
                break;
            }
        }
    }

    drop(listener);

    let grace = Duration::from_secs(state.config.performance.write_timeout);
    if drain_connections(&active_connections, grace).await {
        logger::log_info("[Shutdown] All connections closed");
    } else {
        logger::log_warning(&format!(
            "Shutdown grace period of {}s elapsed with {} connection(s) still open",
            grace.as_secs(),
            active_connections.load(Ordering::SeqCst)
        ));
    }

    Ok(())
}

/// Wait until `active` drops to zero or `grace` elapses
///
/// Returns `true` when every connection finished in time.
async fn drain_connections(active: &AtomicUsize, grace: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        if active.load(Ordering::SeqCst) == 0 {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drain_waits_for_in_flight_connections() {
        let active = Arc::new(AtomicUsize::new(2));
        let worker = Arc::clone(&active);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            worker.fetch_sub(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            worker.fetch_sub(1, Ordering::SeqCst);
        });

        assert!(drain_connections(&active, Duration::from_secs(5)).await);
        assert_eq!(active.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_drain_gives_up_after_grace_period() {
        let active = AtomicUsize::new(1);
        let started = tokio::time::Instant::now();
        assert!(!drain_connections(&active, Duration::from_millis(120)).await);
        assert!(started.elapsed() >= Duration::from_millis(120));
    }

    #[tokio::test]
    async fn test_drain_returns_immediately_when_idle() {
        let active = AtomicUsize::new(0);
        assert!(drain_connections(&active, Duration::ZERO).await);
    }
}
