//! Router-level tests for login, logout and token authentication.

mod common;

use axum::http::StatusCode;
use backend::utils::jwt::{JwtUtils, TokenSubject};
use chrono::{DateTime, Duration, TimeZone, Utc};
use common::{TestApp, content_type, jwt_at};
use std::sync::Arc;

fn issued_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn login_succeeds_with_correct_password() {
    let app = TestApp::with_jwt(jwt_at(issued_at())).await;
    let user = app
        .create_user("user1", "user1@email.email", "12345678")
        .await;

    let response = app.login("user1", "12345678").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(content_type(&response).starts_with("application/json"));
    assert_eq!(response.body["message"], "Logged in successfully!");

    let token = response.body["data"]["accessToken"]
        .as_str()
        .expect("accessToken is a string");
    let claims = jwt_at(issued_at()).validate_token(token).unwrap();
    assert_eq!(
        claims.subject(),
        TokenSubject {
            id: user["id"].as_str().unwrap().to_string(),
            username: "user1".to_string(),
        }
    );
    assert_eq!(claims.iat, issued_at().timestamp());
    assert_eq!(claims.exp, issued_at().timestamp() + 60);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorised() {
    let app = TestApp::new().await;
    app.create_user("user1", "user1@email.email", "12345678")
        .await;

    let response = app.login("user1", "wrong").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body,
        serde_json::json!({ "message": "Unauthorised - incorrect password" })
    );
}

#[tokio::test]
async fn login_with_unknown_username_is_not_found() {
    let app = TestApp::new().await;
    app.create_user("user1", "user1@email.email", "12345678")
        .await;

    let response = app.login("nobody", "x").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body,
        serde_json::json!({ "message": "User with username nobody not found" })
    );
}

#[tokio::test]
async fn login_with_empty_fields_fails_lookup_or_verification() {
    let app = TestApp::new().await;
    app.create_user("user1", "user1@email.email", "12345678")
        .await;

    let empty_password = app.login("user1", "").await;
    assert_eq!(empty_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        empty_password.body,
        serde_json::json!({ "message": "Unauthorised - incorrect password" })
    );

    let empty_username = app.login("", "x").await;
    assert_eq!(empty_username.status, StatusCode::NOT_FOUND);
    assert_eq!(
        empty_username.body,
        serde_json::json!({ "message": "User with username  not found" })
    );
}

#[tokio::test]
async fn unreadable_login_bodies_get_a_json_message() {
    let app = TestApp::new().await;

    let malformed = app
        .send_raw("POST", "/login", Some("application/json"), "{\"username\":")
        .await;
    let missing_field = app
        .send_raw(
            "POST",
            "/login",
            Some("application/json"),
            r#"{"username":"user1"}"#,
        )
        .await;
    let no_content_type = app
        .send_raw(
            "POST",
            "/login",
            None,
            r#"{"username":"user1","password":"x"}"#,
        )
        .await;

    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_field.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(no_content_type.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    for response in [malformed, missing_field, no_content_type] {
        assert!(content_type(&response).starts_with("application/json"));
        assert!(response.body["message"].is_string(), "{}", response.body);
        assert!(response.body.get("data").is_none());
    }
}

#[tokio::test]
async fn logout_is_stateless() {
    let app = TestApp::new().await;

    let response = app.send_empty("POST", "/logout").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logged out successfully");
}

#[tokio::test]
async fn me_returns_the_authenticated_user() {
    let app = TestApp::new().await;
    let user = app
        .create_user("user1", "user1@email.email", "12345678")
        .await;
    let login = app.login("user1", "12345678").await;
    let token = login.body["data"]["accessToken"].as_str().unwrap();

    let response = app.get_with_token("/me", token).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user"]["id"], user["id"]);
    assert_eq!(response.body["data"]["user"]["username"], "user1");
    assert!(response.body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn token_is_accepted_until_its_ttl_elapses() {
    let app = TestApp::with_jwt(jwt_at(issued_at())).await;
    app.create_user("user1", "user1@email.email", "12345678")
        .await;
    let login = app.login("user1", "12345678").await;
    let token = login.body["data"]["accessToken"]
        .as_str()
        .unwrap()
        .to_string();

    let before_expiry =
        TestApp::on_database(app.db.clone(), jwt_at(issued_at() + Duration::seconds(59)));
    let response = before_expiry.get_with_token("/me", &token).await;
    assert_eq!(response.status, StatusCode::OK);

    let at_expiry =
        TestApp::on_database(app.db.clone(), jwt_at(issued_at() + Duration::seconds(60)));
    let response = at_expiry.get_with_token("/me", &token).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body,
        serde_json::json!({ "message": "Unauthenticated" })
    );
}

#[tokio::test]
async fn rejected_tokens_share_one_response() {
    let app = TestApp::with_jwt(jwt_at(issued_at())).await;
    let user = app
        .create_user("user1", "user1@email.email", "12345678")
        .await;

    let foreign_key = JwtUtils::with_clock(
        b"some-other-secret",
        Duration::seconds(60),
        Arc::new(backend::utils::jwt::FixedClock(issued_at())),
    );
    let foreign_token = foreign_key
        .generate_token(TokenSubject {
            id: user["id"].as_str().unwrap().to_string(),
            username: "user1".to_string(),
        })
        .unwrap();

    let expired_token = jwt_at(issued_at() - Duration::hours(1))
        .generate_token(TokenSubject {
            id: user["id"].as_str().unwrap().to_string(),
            username: "user1".to_string(),
        })
        .unwrap();

    let missing = app.send_empty("GET", "/me").await;
    let garbage = app.get_with_token("/me", "garbage").await;
    let foreign = app.get_with_token("/me", &foreign_token).await;
    let expired = app.get_with_token("/me", &expired_token).await;

    for response in [missing, garbage, foreign, expired] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.body,
            serde_json::json!({ "message": "Unauthenticated" })
        );
    }
}

#[tokio::test]
async fn me_for_a_deleted_user_is_not_found() {
    let app = TestApp::new().await;
    let user = app
        .create_user("user1", "user1@email.email", "12345678")
        .await;
    let login = app.login("user1", "12345678").await;
    let token = login.body["data"]["accessToken"]
        .as_str()
        .unwrap()
        .to_string();

    let id = user["id"].as_str().unwrap();
    let deleted = app.send_empty("DELETE", &format!("/user/{}", id)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let response = app.get_with_token("/me", &token).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
