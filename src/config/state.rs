// Application state module
// Shared, read-only view of the configuration plus connection accounting

use std::sync::atomic::AtomicUsize;

use super::types::Config;

/// Application state
///
/// Classification itself is stateless; this only carries what the transport
/// and access logging need.
pub struct AppState {
    pub config: Config,
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            active_connections: AtomicUsize::new(0),
        }
    }
}
