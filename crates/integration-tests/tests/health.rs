//! Liveness and readiness endpoints.

use axum::http::StatusCode;

use orderdesk_integration_tests::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_readiness_without_database() {
    let app = TestApp::new();
    assert_eq!(app.get("/health/ready").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();
    assert_eq!(app.get("/api/unknown").await.status, StatusCode::NOT_FOUND);
}
