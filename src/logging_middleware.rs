// src/logging_middleware.rs
//! Middleware for logging JSON request and response bodies in debug mode

use axum::body::to_bytes;
use axum::{
    body::Body,
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, Level};

/// Bodies larger than this are not buffered (same as axum's default body limit)
const MAX_BUFFERED_BYTES: usize = 2 * 1024 * 1024;

/// Logged bodies are cut to this many characters
const MAX_LOGGED_CHARS: usize = 4096;

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false)
}

/// Pretty JSON when it parses, raw text otherwise, truncated for the log line
fn render_body(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let body_str = std::str::from_utf8(bytes).ok()?;
    let rendered = serde_json::from_str::<serde_json::Value>(body_str)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or_else(|| body_str.to_string());

    Some(truncate(rendered, MAX_LOGGED_CHARS))
}

fn truncate(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}… ({} bytes total)", &text[..cut], text.len()),
        None => text,
    }
}

/// Middleware to log request and response bodies in debug mode.
/// Outside debug level, or for non-JSON bodies, requests pass straight through.
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !tracing::enabled!(Level::DEBUG) {
        return Ok(next.run(request).await);
    }

    let request = if is_json(request.headers()) {
        let (parts, body) = request.into_parts();
        let bytes = to_bytes(body, MAX_BUFFERED_BYTES)
            .await
            .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)?;

        if let Some(request_body) = render_body(&bytes) {
            debug!(
                method = %parts.method,
                uri = %parts.uri,
                request_body = %request_body,
                "📥 Request"
            );
        }

        Request::from_parts(parts, Body::from(bytes))
    } else {
        request
    };

    let response = next.run(request).await;

    if !is_json(response.headers()) {
        return Ok(response);
    }

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, MAX_BUFFERED_BYTES)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if let Some(response_body) = render_body(&bytes) {
        debug!(
            status = %parts.status,
            response_body = %response_body,
            "📤 Response"
        );
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_body_pretty_prints_json() {
        let rendered = render_body(br#"{"a":1}"#).expect("rendered");
        assert_eq!(rendered, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_render_body_skips_empty_and_binary() {
        assert!(render_body(b"").is_none());
        assert!(render_body(&[0xff, 0xfe]).is_none());
    }

    #[test]
    fn test_truncate_long_bodies() {
        let long = "x".repeat(10);
        assert_eq!(truncate(long.clone(), 20), long);
        assert_eq!(truncate(long, 4), "xxxx… (10 bytes total)");
    }

    #[test]
    fn test_is_json() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));
        headers.insert(
            CONTENT_TYPE,
            "application/json; charset=utf-8".parse().expect("header"),
        );
        assert!(is_json(&headers));
    }
}
