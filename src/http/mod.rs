//! HTTP protocol layer module
//!
//! Response builders shared by the request handlers.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_405_response, build_500_response, build_json_response,
    build_preflight_response, HttpResponse,
};
