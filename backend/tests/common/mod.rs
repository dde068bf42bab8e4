//! Shared helpers for router-level tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use backend::build_router;
use backend::database::Database;
use backend::utils::jwt::{Clock, FixedClock, JwtUtils, SystemClock};
use backend::utils::password::PasswordHasher;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const SECRET: &[u8] = b"integration-test-secret";
pub const TTL_SECONDS: i64 = 60;

pub struct TestApp {
    pub router: Router,
    pub db: Database,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn jwt_with_clock(clock: Arc<dyn Clock>) -> Arc<JwtUtils> {
    Arc::new(JwtUtils::with_clock(
        SECRET,
        Duration::seconds(TTL_SECONDS),
        clock,
    ))
}

pub fn jwt_at(instant: DateTime<Utc>) -> Arc<JwtUtils> {
    jwt_with_clock(Arc::new(FixedClock(instant)))
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_jwt(jwt_with_clock(Arc::new(SystemClock))).await
    }

    pub async fn with_jwt(jwt_utils: Arc<JwtUtils>) -> Self {
        let db = Database::in_memory().await.expect("in-memory database");
        Self::on_database(db, jwt_utils)
    }

    /// A second router over the same database, e.g. with another clock.
    pub fn on_database(db: Database, jwt_utils: Arc<JwtUtils>) -> Self {
        let router = build_router(db.pool().clone(), jwt_utils, PasswordHasher::new(4));
        Self { router, db }
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("parse JSON")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn send_json(&self, method: &str, uri: &str, payload: Value) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Sends `body` verbatim, with a content type only when one is given.
    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.request(request).await
    }

    pub async fn send_empty(&self, method: &str, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.request(request).await
    }

    pub async fn get_with_token(&self, uri: &str, token: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header("access-token", token)
            .body(Body::empty())
            .unwrap();
        self.request(request).await
    }

    pub async fn create_user(&self, username: &str, email: &str, password: &str) -> Value {
        let response = self
            .send_json(
                "POST",
                "/user",
                serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["user"].clone()
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.send_json(
            "POST",
            "/login",
            serde_json::json!({ "username": username, "password": password }),
        )
        .await
    }
}

pub fn content_type(response: &TestResponse) -> &str {
    response
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
