use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use course_service::app::api_router;
use serde_json::Value;
use test_log::test;
use tower::ServiceExt;

async fn send(uri: &str) -> (StatusCode, Value) {
    let response = api_router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[test(tokio::test)]
async fn test_health_is_public() {
    let (status, body) = send("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[test(tokio::test)]
async fn test_missing_token_is_unauthenticated() {
    let (status, body) = send("/api/v1/courses/mine").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[test(tokio::test)]
async fn test_unknown_route_returns_json_not_found() {
    let (status, body) = send("/api/v1/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}
