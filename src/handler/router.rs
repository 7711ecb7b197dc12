//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! health probes, preset resolution and access logging.

use std::net::SocketAddr;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::header::{HeaderName, IF_NONE_MATCH, REFERER, USER_AGENT};
use hyper::{Method, Request, Response, Version};

use crate::config::{AppState, HealthConfig};
use crate::handler::responder;
use crate::http::cache::CachePolicy;
use crate::http::{self, ScriptResponse};
use crate::logger::{self, AccessLogEntry};
use crate::routing;

/// Request context encapsulating information needed for request processing
#[derive(Debug)]
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<&'a str>,
}

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub fn handle_request<B>(
    req: &Request<B>,
    state: &AppState,
    peer_addr: SocketAddr,
) -> Response<Full<Bytes>> {
    let started = Instant::now();
    let response = dispatch(req, state);

    if state.access_log_enabled() {
        log_access(
            req,
            &response,
            peer_addr,
            started,
            &state.config.logging.access_log_format,
        );
    }

    response
}

fn dispatch<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    let method = req.method();

    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return resp;
    }

    let ctx = RequestContext {
        path: req.uri().path(),
        is_head: *method == Method::HEAD,
        if_none_match: req
            .headers()
            .get(IF_NONE_MATCH)
            .and_then(|v| v.to_str().ok()),
    };

    // 2. Health check endpoints
    if let Some(resp) = check_health(&ctx, &state.config.health) {
        return resp;
    }

    // 3. Preset routes
    serve_preset(&ctx, state)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn check_health(ctx: &RequestContext<'_>, health: &HealthConfig) -> Option<Response<Full<Bytes>>> {
    if !health.enabled {
        return None;
    }
    // Readiness equals liveness: presets are fully loaded before the listener accepts
    if ctx.path == health.liveness_path || ctx.path == health.readiness_path {
        return Some(http::build_health_response("ok", ctx.is_head));
    }
    None
}

fn serve_preset(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let rendered = routing::resolve(ctx.path, &state.presets)
        .and_then(|route| responder::render(&route, &state.presets));

    match rendered {
        Ok(script) => http::build_script_response(ScriptResponse {
            body: responder::into_bytes(script),
            server_name: &state.config.http.server_name,
            cache: CachePolicy::from_max_age(state.config.http.cache_max_age),
            if_none_match: ctx.if_none_match,
            is_head: ctx.is_head,
        }),
        Err(e) => {
            logger::log_debug(&format!("{} -> 404 ({e})", ctx.path));
            http::build_404_response()
        }
    }
}

const fn http_version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

fn log_access<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    format: &str,
) {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = http_version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, format);
}
