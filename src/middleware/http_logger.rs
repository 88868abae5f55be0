use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, header};
use http_body_util::BodyExt;
use serde_json::Value;
use std::time::Instant;

use crate::config::APP_CONFIG;
use crate::error::AppError;

const REDACTED: &str = "[REDACTED]";

/// Credential fields that appear in auth and profile payloads.
const SENSITIVE_FIELDS: [&str; 5] = ["password", "currentPassword", "newPassword", "token", "secret"];

const SENSITIVE_HEADERS: [header::HeaderName; 2] = [header::AUTHORIZATION, header::COOKIE];

fn should_ignore_path(path: &str) -> bool {
    matches!(path, "/health" | "/api/v1/health") || path.starts_with("/swagger-ui")
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

fn redact(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if SENSITIVE_FIELDS.contains(&key.as_str()) {
                    *field = Value::String(REDACTED.to_string());
                } else {
                    redact(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact),
        _ => {}
    }
}

/// Parses a JSON body for logging. Anything else logs as `null`.
fn loggable_body(bytes: &Bytes) -> Value {
    let mut value = serde_json::from_slice(bytes).unwrap_or(Value::Null);
    redact(&mut value);
    value
}

fn redact_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = headers.clone();
    for name in SENSITIVE_HEADERS {
        if filtered.contains_key(&name) {
            filtered.insert(name, HeaderValue::from_static(REDACTED));
        }
    }
    filtered
}

async fn buffer_body(direction: &str, body: Body) -> Result<Bytes, AppError> {
    body.collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|err| AppError::Validation(format!("Failed to read {direction} body: {err}")))
}

/// Logs every API call with its latency. JSON request bodies are logged with
/// credentials redacted; response bodies only for failed calls.
pub async fn http_logger(req: Request, next: Next) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();
    if should_ignore_path(&path) || req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let start_time = Instant::now();
    let method = req.method().clone();
    let req_headers = redact_headers(req.headers());
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let (req, req_body) = if is_json(req.headers()) {
        let (parts, body) = req.into_parts();
        let bytes = buffer_body("request", body).await?;
        let logged = loggable_body(&bytes);
        (Request::from_parts(parts, Body::from(bytes)), logged)
    } else {
        (req, Value::Null)
    };

    let response = next.run(req).await;
    let latency = start_time.elapsed();
    let status = response.status();

    let (response, res_body) = if status.is_client_error() || status.is_server_error() {
        let (parts, body) = response.into_parts();
        let bytes = buffer_body("response", body).await?;
        let logged = loggable_body(&bytes);
        (Response::from_parts(parts, Body::from(bytes)), logged)
    } else {
        (response, Value::Null)
    };

    macro_rules! log_call {
        ($level:ident) => {
            tracing::$level!(
                method = %method,
                path = %path,
                request_id = %request_id,
                status = status.as_u16(),
                latency_ms = latency.as_millis(),
                req_headers = ?req_headers,
                req_body = %req_body,
                res_body = %res_body,
                app_env = %APP_CONFIG.app_env,
                "HTTP request completed"
            )
        };
    }
    if status.is_server_error() {
        log_call!(error);
    } else if status.is_client_error() {
        log_call!(warn);
    } else {
        log_call!(info);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_credentials_are_redacted() {
        let mut body = json!({
            "email": "a@b.io",
            "password": "hunter22",
            "profile": {"currentPassword": "old", "newPassword": "new"},
            "sessions": [{"token": "abc"}]
        });
        redact(&mut body);
        assert_eq!(body["password"], REDACTED);
        assert_eq!(body["profile"]["currentPassword"], REDACTED);
        assert_eq!(body["profile"]["newPassword"], REDACTED);
        assert_eq!(body["sessions"][0]["token"], REDACTED);
        assert_eq!(body["email"], "a@b.io");
    }

    #[test]
    fn test_non_json_body_logs_as_null() {
        assert_eq!(loggable_body(&Bytes::from_static(b"not json")), Value::Null);
    }

    #[test]
    fn test_authorization_header_is_redacted() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let filtered = redact_headers(&headers);
        assert_eq!(filtered[header::AUTHORIZATION], REDACTED);
        assert_eq!(filtered[header::ACCEPT], "application/json");
    }

    #[test]
    fn test_json_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(is_json(&headers));
    }

    #[test]
    fn test_health_probes_are_not_logged() {
        assert!(should_ignore_path("/health"));
        assert!(should_ignore_path("/api/v1/health"));
        assert!(!should_ignore_path("/api/v1/courses"));
    }
}
