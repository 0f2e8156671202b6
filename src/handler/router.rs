//! Request router
//!
//! Entry point for every request: dispatches on path and method, then
//! writes one access log line for the response.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use hyper::body::Body;
use hyper::{Method, Request};

use super::classify::{handle_classify, CLASSIFY_PATH};
use crate::config::AppState;
use crate::http::{build_404_response, build_405_response, build_preflight_response, HttpResponse};
use crate::logger::{self, AccessLogEntry};

/// Dispatch on path first, then method.
///
/// HEAD is served like GET; hyper omits the body on the wire.
async fn route_request(
    method: &Method,
    path: &str,
    query: Option<&str>,
    server_name: &str,
) -> HttpResponse {
    if path != CLASSIFY_PATH {
        return build_404_response(server_name);
    }

    match *method {
        Method::OPTIONS => build_preflight_response(server_name),
        Method::GET | Method::HEAD => handle_classify(query, server_name).await,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            build_405_response(server_name)
        }
    }
}

pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<HttpResponse, Infallible> {
    let started = Instant::now();
    let (parts, _) = req.into_parts();

    let logging = &state.config.logging;
    let mut entry = logging
        .access_log
        .then(|| AccessLogEntry::from_request(&peer_addr.to_string(), &parts));

    let response = route_request(
        &parts.method,
        parts.uri.path(),
        parts.uri.query(),
        &state.config.http.server_name,
    )
    .await;

    if let Some(entry) = entry.as_mut() {
        let body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.finish(response.status().as_u16(), body_bytes, started.elapsed());
        logger::log_access(entry, &logging.access_log_format);
    }

    Ok(response)
}
