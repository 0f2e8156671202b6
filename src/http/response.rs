//! HTTP response building module
//!
//! Every response carries the same permissive CORS headers and a JSON
//! content type, including errors and preflight replies.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::logger;

pub type HttpResponse = Response<Full<Bytes>>;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

const INTERNAL_ERROR_BODY: &str = r#"{"error":"Internal server error"}"#;

/// Response builder with CORS, content type and server headers set
fn base_builder(status: StatusCode, server_name: &str) -> Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .header("Content-Type", CONTENT_TYPE_JSON)
        .header("Server", server_name)
}

/// Serialize `body` as compact JSON
///
/// A serialization failure degrades to a 500 with a fixed JSON body.
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    server_name: &str,
) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(json) => finish(base_builder(status, server_name), Bytes::from(json)),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            build_500_response(server_name)
        }
    }
}

/// Build OPTIONS response (CORS preflight)
pub fn build_preflight_response(server_name: &str) -> HttpResponse {
    finish(
        base_builder(StatusCode::NO_CONTENT, server_name),
        Bytes::new(),
    )
}

/// Build 404 Not Found response
pub fn build_404_response(server_name: &str) -> HttpResponse {
    finish(
        base_builder(StatusCode::NOT_FOUND, server_name),
        Bytes::from_static(br#"{"error":"Not Found"}"#),
    )
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(server_name: &str) -> HttpResponse {
    finish(
        base_builder(StatusCode::METHOD_NOT_ALLOWED, server_name).header("Allow", "GET, OPTIONS"),
        Bytes::from_static(br#"{"error":"Method Not Allowed"}"#),
    )
}

/// Build 500 Internal Server Error response
pub fn build_500_response(server_name: &str) -> HttpResponse {
    finish(
        base_builder(StatusCode::INTERNAL_SERVER_ERROR, server_name),
        Bytes::from_static(INTERNAL_ERROR_BODY.as_bytes()),
    )
}

fn finish(builder: Builder, body: Bytes) -> HttpResponse {
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to build response: {e}"));
        let mut fallback = Response::new(Full::new(Bytes::from_static(
            INTERNAL_ERROR_BODY.as_bytes(),
        )));
        *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        let headers = fallback.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ORIGIN));
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn assert_cors(resp: &HttpResponse) {
        let headers = resp.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(headers["content-type"], "application/json");
    }

    async fn body_bytes(resp: HttpResponse) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_json_response() {
        let resp = build_json_response(StatusCode::OK, &serde_json::json!({"a": 1}), "test");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_cors(&resp);
        assert_eq!(resp.headers()["server"], "test");
        assert_eq!(body_bytes(resp).await, Bytes::from_static(br#"{"a":1}"#));
    }

    #[tokio::test]
    async fn test_preflight_response_is_empty() {
        let resp = build_preflight_response("test");
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_cors(&resp);
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_server_name_still_gets_cors_headers() {
        let resp = build_json_response(StatusCode::OK, &serde_json::json!({"a": 1}), "bad\nname");
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&resp);
        assert!(resp.headers().get("server").is_none());
        assert_eq!(body_bytes(resp).await, Bytes::from_static(INTERNAL_ERROR_BODY.as_bytes()));
    }

    #[test]
    fn test_error_responses_carry_cors() {
        let not_found = build_404_response("test");
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_cors(&not_found);

        let not_allowed = build_405_response("test");
        assert_eq!(not_allowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(not_allowed.headers()["allow"], "GET, OPTIONS");
        assert_cors(&not_allowed);
    }
}
