// Shutdown module
// Waits for in-flight connections after the listener stops accepting

use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::config::AppState;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Wait until no connection is active or `grace` elapses.
///
/// Returns the number of connections still open when the wait ended.
pub async fn drain_connections(state: &AppState, grace: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        let active = state.active_connections.load(Ordering::SeqCst);
        if active == 0 {
            logger::log_info("All connections closed");
            return 0;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period of {}s elapsed with {active} connection(s) still open",
                grace.as_secs()
            ));
            return active;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_state() -> AppState {
        let mut cfg = Config::load_from("definitely-missing-classifier-config").unwrap();
        cfg.logging.access_log = false;
        AppState::new(cfg)
    }

    #[tokio::test]
    async fn test_drain_returns_immediately_when_idle() {
        let state = test_state();
        assert_eq!(drain_connections(&state, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_gives_up_after_grace() {
        let state = test_state();
        state.active_connections.store(2, Ordering::SeqCst);
        assert_eq!(drain_connections(&state, Duration::from_secs(1)).await, 2);
    }
}
