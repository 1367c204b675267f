//! HTTP-level tests for the required and optional gates.
//!
//! Tests cover:
//! - Missing / malformed Authorization header
//! - Bad signature and expired tokens answering the same code
//! - Unknown and inactive users
//! - Identity binding for active users
//! - Optional mode never answering 401
//! - Store failures and request deadlines

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use bearer_gate::{app, config::Config};
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_required_without_header() {
    let (state, _) = test_state(vec![user(1, true)]).await;
    let app = app::router(state);

    let (status, body) = send(&app, get("/api/v1/me")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authorization header required");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_optional_without_header_continues_anonymously() {
    let (state, _) = test_state(vec![user(1, true)]).await;
    let app = app::router(state);

    let (status, body) = send(&app, get("/api/v1/greeting")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);
    assert!(body.get("user_id").is_none());
}

#[tokio::test]
async fn test_required_rejects_non_bearer_scheme() {
    let (state, _) = test_state(vec![user(1, true)]).await;
    let app = app::router(state);

    for value in ["Basic dXNlcjpwdw==", "Token abc", "bearer abc"] {
        let (status, body) = send(&app, get_with_auth("/api/v1/me", value)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{value}");
        assert_eq!(body["error"], "Invalid token format", "{value}");
    }
}

#[tokio::test]
async fn test_required_rejects_wrong_secret() {
    let (state, _) = test_state(vec![user(1, true)]).await;
    let app = app::router(state);

    let auth = format!("Bearer {}", forged_token_for(1));
    let (status, body) = send(&app, get_with_auth("/api/v1/me", &auth)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn test_expired_token_indistinguishable_from_forged() {
    let (state, _) = test_state(vec![user(1, true)]).await;
    let app = app::router(state);

    let expired = format!("Bearer {}", expired_token_for(1));
    let forged = format!("Bearer {}", forged_token_for(1));

    let (expired_status, expired_body) = send(&app, get_with_auth("/api/v1/me", &expired)).await;
    let (forged_status, forged_body) = send(&app, get_with_auth("/api/v1/me", &forged)).await;

    assert_eq!(expired_status, StatusCode::UNAUTHORIZED);
    assert_eq!(expired_status, forged_status);
    assert_eq!(expired_body, forged_body);
}

#[tokio::test]
async fn test_empty_bearer_is_invalid_token() {
    let (state, _) = test_state(vec![user(1, true)]).await;
    let app = app::router(state);

    let (status, body) = send(&app, get_with_auth("/api/v1/me", "Bearer ")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn test_unusable_subject_is_invalid_claims() {
    let (state, _) = test_state(vec![user(1, true)]).await;
    let app = app::router(state);

    let token = sign(json!({"sub": "alice", "exp": now() + 300}), SECRET);
    let auth = format!("Bearer {token}");
    let (status, body) = send(&app, get_with_auth("/api/v1/me", &auth)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token claims");
}

#[tokio::test]
async fn test_unknown_user() {
    let (state, _) = test_state(vec![user(1, true)]).await;
    let app = app::router(state);

    let auth = format!("Bearer {}", token_for(404));
    let (status, body) = send(&app, get_with_auth("/api/v1/me", &auth)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_inactive_user() {
    let (state, _) = test_state(vec![user(2, false)]).await;
    let app = app::router(state);
    let auth = format!("Bearer {}", token_for(2));

    let (status, body) = send(&app, get_with_auth("/api/v1/me", &auth)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User inactive");

    // Optional mode treats the inactive user as anonymous, not as authenticated.
    let (status, body) = send(&app, get_with_auth("/api/v1/greeting", &auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
async fn test_active_user_is_bound_in_required_mode() {
    let (state, _) = test_state(vec![user(3, true)]).await;
    let app = app::router(state);

    let auth = format!("Bearer {}", token_for(3));
    let (status, body) = send(&app, get_with_auth("/api/v1/me", &auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 3);
    assert_eq!(body["email"], "user3@example.com");
}

#[tokio::test]
async fn test_active_user_is_bound_in_optional_mode() {
    let (state, _) = test_state(vec![user(3, true)]).await;
    let app = app::router(state);

    let auth = format!("Bearer {}", token_for(3));
    let (status, body) = send(&app, get_with_auth("/api/v1/greeting", &auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user_id"], 3);
}

#[tokio::test]
async fn test_numeric_subject_round_trip() {
    let (state, _) = test_state(vec![user(77, true)]).await;
    let app = app::router(state);

    let token = sign(json!({"sub": 77, "iat": now(), "exp": now() + 300}), SECRET);
    let auth = format!("Bearer {token}");
    let (status, body) = send(&app, get_with_auth("/api/v1/me", &auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 77);
}

#[tokio::test]
async fn test_same_token_twice_yields_same_user() {
    let (state, _) = test_state(vec![user(5, true)]).await;
    let app = app::router(state);
    let auth = format!("Bearer {}", token_for(5));

    let first = send(&app, get_with_auth("/api/v1/me", &auth)).await;
    let second = send(&app, get_with_auth("/api/v1/me", &auth)).await;
    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_deactivation_takes_effect_on_next_request() {
    let (state, store) = test_state(vec![user(6, true)]).await;
    let app = app::router(state);
    let auth = format!("Bearer {}", token_for(6));

    let (status, _) = send(&app, get_with_auth("/api/v1/me", &auth)).await;
    assert_eq!(status, StatusCode::OK);

    store.set_active(6, false).await;
    let (status, body) = send(&app, get_with_auth("/api/v1/me", &auth)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User inactive");

    store.remove(6).await;
    let (status, body) = send(&app, get_with_auth("/api/v1/me", &auth)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_optional_mode_never_answers_401() {
    let (state, _) = test_state(vec![user(1, true), user(2, false)]).await;
    let app = app::router(state);

    let headers = vec![
        "Basic abc".to_string(),
        "Bearer not-a-jwt".to_string(),
        format!("Bearer {}", forged_token_for(1)),
        format!("Bearer {}", expired_token_for(1)),
        format!("Bearer {}", token_for(404)),
        format!("Bearer {}", token_for(2)),
    ];

    for auth in headers {
        let (status, body) = send(&app, get_with_auth("/api/v1/greeting", &auth)).await;
        assert_eq!(status, StatusCode::OK, "{auth}");
        assert_eq!(body["authenticated"], false, "{auth}");
    }
}

#[tokio::test]
async fn test_health_is_public() {
    let (state, _) = test_state(vec![]).await;
    let app = app::router(state);

    let (status, body) = send(&app, get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_404_not_401() {
    let (state, _) = test_state(vec![]).await;
    let app = app::router(state);

    let (status, _) = send(&app, get("/api/v1/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_failure_is_500_in_required_mode() {
    let app = app::router(state_with_store(Arc::new(FailingStore)));
    let auth = format!("Bearer {}", token_for(1));

    let (status, body) = send(&app, get_with_auth("/api/v1/me", &auth)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");

    let (status, body) = send(&app, get_with_auth("/api/v1/greeting", &auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
async fn test_request_deadline_abandons_lookup() {
    let store = common::SlowStore(bearer_gate::services::users::MemoryUserStore::new());
    let state = state_with_store(Arc::new(store));

    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://unused".to_string()),
        "JWT_SECRET" => Some(String::from_utf8_lossy(SECRET).into_owned()),
        "REQUEST_TIMEOUT_SECONDS" => Some("1".to_string()),
        _ => None,
    })
    .unwrap();
    let app = app::build_app(state, &config);

    let auth = format!("Bearer {}", token_for(1));
    let (status, _) = send(&app, get_with_auth("/api/v1/me", &auth)).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn test_full_app_sets_response_headers() {
    let (state, _) = test_state(vec![user(1, true)]).await;
    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://unused".to_string()),
        "JWT_SECRET" => Some(String::from_utf8_lossy(SECRET).into_owned()),
        _ => None,
    })
    .unwrap();
    let app = app::build_app(state, &config);

    let response = tower::ServiceExt::oneshot(app, get("/api/v1/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["cache-control"], "no-store");
    assert!(response.headers().contains_key("x-request-id"));
}
