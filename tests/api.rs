//! Routing and request validation that is decided before any database access.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tablecall::app;
use tablecall::modules::request::feed::ChangeFeed;
use tablecall::types::{AppContext, AppEnvironment, Context};
use tablecall::utils::database;
use tower::ServiceExt;

const ADMIN_TOKEN: &str = "admin-secret";

fn router(admin_token: Option<&str>) -> Router {
    let ctx = Context {
        app: AppContext {
            host: "127.0.0.1".to_string(),
            environment: AppEnvironment::Development,
            port: 8000,
            url: "http://localhost:8000".to_string(),
            admin_token: admin_token.map(str::to_string),
        },
        db_conn: database::connect_lazy("postgres://tablecall@localhost/tablecall_test", 1)
            .unwrap(),
        changes: ChangeFeed::new(16),
    };

    app::router(Arc::new(ctx))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn unknown_request_type_is_rejected() {
    let response = router(None)
        .oneshot(
            Request::post("/api/tables/some-token/requests")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"type":"dessert"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid request type");
}

#[tokio::test]
async fn malformed_request_bodies_are_invalid_types() {
    for body in [r#"{}"#, r#"{"type":5}"#, r#"{"type":null}"#, "not json"] {
        let response = router(None)
            .oneshot(
                Request::post("/api/tables/some-token/requests")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body={}", body);
        assert_eq!(body_json(response).await["error"], "Invalid request type");
    }
}

#[tokio::test]
async fn missing_content_type_is_an_invalid_type() {
    let response = router(None)
        .oneshot(
            Request::post("/api/tables/some-token/requests")
                .body(Body::from(r#"{"type":"waiter"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid request type");
}

#[tokio::test]
async fn panel_requires_a_bearer_token() {
    let response = router(None)
        .oneshot(Request::get("/api/panel").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_are_closed_without_admin_token() {
    let response = router(None)
        .oneshot(
            Request::get("/api/admin/requests/open")
                .header(header::AUTHORIZATION, "Bearer anything")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_routes_reject_wrong_token() {
    let response = router(Some(ADMIN_TOKEN))
        .oneshot(
            Request::get("/api/admin/requests/open")
                .header(header::AUTHORIZATION, "Bearer guess")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn snapshot_limit_is_validated() {
    for limit in ["0", "101"] {
        let response = router(Some(ADMIN_TOKEN))
            .oneshot(
                Request::get(format!("/api/admin/requests/open?limit={}", limit))
                    .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "limit={}", limit);
    }
}
