// Server module entry point
// Listener setup, connection handling, signals and graceful shutdown

pub mod connection;
pub mod listener;
pub mod shutdown;
pub mod signal;

// `loop` is a keyword, so the file is mounted under another name
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;
pub use signal::{start_signal_handler, SignalHandler};
