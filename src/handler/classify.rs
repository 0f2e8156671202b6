//! Classification endpoint
//!
//! Parses the `number` query parameter, runs the classifier and maps the
//! outcome to a 200 result or a 400 error body.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hyper::StatusCode;

use crate::classifier::ClassificationResult;
use crate::error::ClassifyError;
use crate::http::{build_500_response, build_json_response, HttpResponse};
use crate::logger;

pub const CLASSIFY_PATH: &str = "/api/classify-number";
const NUMBER_PARAM: &str = "number";

/// Raw, percent-decoded `number` value; the first occurrence wins.
///
/// A query string that cannot be decoded is treated as having no parameter.
pub fn extract_number_param(query: Option<&str>) -> Option<String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query?).ok()?;
    pairs
        .into_iter()
        .find(|(key, _)| key == NUMBER_PARAM)
        .map(|(_, value)| value)
}

/// Integer-only parse; a missing parameter reports an empty raw value.
pub fn parse_number(raw: Option<String>) -> Result<i64, ClassifyError> {
    let raw = raw.unwrap_or_default();
    raw.parse::<i64>()
        .map_err(|_| ClassifyError::InvalidNumberInput { raw })
}

/// Handle `GET /api/classify-number`
pub async fn handle_classify(query: Option<&str>, server_name: &str) -> HttpResponse {
    let number = match parse_number(extract_number_param(query)) {
        Ok(n) => n,
        Err(err) => {
            logger::log_debug(&err.to_string());
            return build_json_response(StatusCode::BAD_REQUEST, &err.to_body(), server_name);
        }
    };

    // Trial division over a large i64 is CPU-bound, keep it off the reactor.
    // The guard raises the flag if this future is dropped (connection
    // timeout, client gone), which stops the blocking task's divisor loops.
    let guard = CancelOnDrop::new();
    let cancel = guard.flag();
    let task =
        tokio::task::spawn_blocking(move || ClassificationResult::classify_cancellable(number, &cancel));

    match task.await {
        Ok(Some(result)) => {
            logger::log_debug(&format!(
                "Classified {number}: prime={} perfect={}",
                result.is_prime, result.is_perfect
            ));
            build_json_response(StatusCode::OK, &result, server_name)
        }
        Ok(None) => {
            logger::log_warning(&format!("Classification of {number} was cancelled"));
            build_500_response(server_name)
        }
        Err(e) => {
            logger::log_error(&format!("Classification task failed for {number}: {e}"));
            build_500_response(server_name)
        }
    }
}

/// Raises a shared cancellation flag when dropped
struct CancelOnDrop(Arc<AtomicBool>);

impl CancelOnDrop {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}
