//! Request handler module
//!
//! Routing and the classification endpoint.

pub mod classify;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
