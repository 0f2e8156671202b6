// Server loop module
// Accepts connections until a shutdown is requested, then drains

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use super::shutdown::drain_connections;
use crate::config::AppState;
use crate::logger;

/// How long in-flight connections get to finish after shutdown
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Accept loop
///
/// Runs until `shutdown` is notified. The listener is closed before
/// draining so no new connections are admitted during the grace period.
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown("Shutdown requested");
                break;
            }
        }
    }

    drop(listener);
    drain_connections(&state, SHUTDOWN_GRACE).await;
}
