#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use bearer_gate::{
    AppState,
    repos::{error::RepoError, user_repo::User},
    services::{
        auth::{TokenPolicy, TokenVerifier},
        users::{MemoryUserStore, UserStore},
    },
};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const SECRET: &[u8] = b"test-jwt-secret";

pub fn now() -> i64 {
    Utc::now().timestamp()
}

pub fn user(id: i64, is_active: bool) -> User {
    User {
        id,
        email: format!("user{id}@example.com"),
        display_name: format!("user{id}"),
        is_active,
        created_at: Utc::now(),
    }
}

/// State backed by an in-memory store seeded with the given users.
pub async fn test_state(users: Vec<User>) -> (AppState, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::new());
    for u in users {
        store.insert(u).await;
    }
    let verifier = Arc::new(TokenVerifier::new(SECRET, TokenPolicy::default()));
    (AppState::new(store.clone(), verifier), store)
}

pub fn state_with_store(store: Arc<dyn UserStore>) -> AppState {
    let verifier = Arc::new(TokenVerifier::new(SECRET, TokenPolicy::default()));
    AppState::new(store, verifier)
}

pub fn sign(claims: Value, secret: &[u8]) -> String {
    jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
        .expect("Failed to sign token")
}

/// Valid for 5 minutes, subject as a string of digits.
pub fn token_for(user_id: i64) -> String {
    sign(
        json!({"sub": user_id.to_string(), "iat": now(), "exp": now() + 300}),
        SECRET,
    )
}

pub fn expired_token_for(user_id: i64) -> String {
    sign(
        json!({"sub": user_id.to_string(), "iat": now() - 600, "exp": now() - 60}),
        SECRET,
    )
}

pub fn forged_token_for(user_id: i64) -> String {
    sign(
        json!({"sub": user_id.to_string(), "iat": now(), "exp": now() + 300}),
        b"some-other-secret",
    )
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_auth(uri: &str, authorization: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .unwrap()
}

pub fn ws_upgrade(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("connection", "upgrade")
        .header("upgrade", "websocket")
        .header("sec-websocket-version", "13")
        .header("sec-websocket-key", "dGhlIHNhbXBsZSBub25jZQ==")
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Store whose backend is always down.
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, RepoError> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }
}

/// Store that takes longer than any test deadline.
pub struct SlowStore(pub MemoryUserStore);

#[async_trait]
impl UserStore for SlowStore {
    fn backend_name(&self) -> &'static str {
        "slow"
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        self.0.find_by_id(id).await
    }
}
