//! HTTP response building module
//!
//! Provides builders for the handful of responses the preset server emits.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::cache::{self, CachePolicy};

/// Content type of every script response
pub const SCRIPT_CONTENT_TYPE: &str = "text/plain;charset=UTF-8";

/// Inputs for a script response
#[derive(Debug)]
pub struct ScriptResponse<'a> {
    pub body: Bytes,
    pub server_name: &'a str,
    pub cache: CachePolicy,
    pub if_none_match: Option<&'a str>,
    pub is_head: bool,
}

/// Build 200 script response, or 304 when the client already has these bytes
pub fn build_script_response(script: ScriptResponse<'_>) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&script.body);

    if cache::check_etag_match(script.if_none_match, &etag) {
        return build_304_response(&etag, script.cache);
    }

    let content_length = script.body.len();
    let body = if script.is_head {
        Bytes::new()
    } else {
        script.body
    };

    Response::builder()
        .status(200)
        .header("Content-Type", SCRIPT_CONTENT_TYPE)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", script.cache.to_header_value())
        .header("Server", script.server_name)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, policy: CachePolicy) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", policy.to_header_value())
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from_static(b"404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from_static(b"404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from_static(b"405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from_static(b"405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type, If-None-Match")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build health probe response
pub fn build_health_response(status: &'static str, is_head: bool) -> Response<Full<Bytes>> {
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from_static(status.as_bytes())
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain")
        .header("Content-Length", status.len())
        .header("Cache-Control", "no-store")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
