#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use dayjob_api::auth::jwt::{generate_access_token, JwtConfig};
use dayjob_api::config::ServerConfig;
use dayjob_api::router::build_app_router;
use dayjob_api::state::AppState;
use dayjob_core::account::{Account, CreateAccount};
use dayjob_core::marketplace::Marketplace;
use dayjob_core::memory::InMemoryStore;
use dayjob_core::roles::Role;
use dayjob_core::store::AccountStore;

/// Placeholder hash for seeded accounts that never log in with a password.
pub const SEEDED_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2VlZGVk$c2VlZGVk";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// The full application over an in-memory store.
///
/// `store` shares state with the router, so tests can seed records that the
/// public API cannot create (admin accounts).
pub struct TestApp {
    pub router: Router,
    pub store: InMemoryStore,
    pub config: ServerConfig,
}

/// Build the full application router with all middleware layers, exactly as
/// `main.rs` does, over a fresh [`InMemoryStore`].
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let store = InMemoryStore::new();
    let state = AppState {
        marketplace: Marketplace::new(Arc::new(store.clone())),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        config,
    }
}

impl TestApp {
    /// Insert an account directly and mint a bearer token for it.
    pub async fn seed_account(&self, username: &str, role: Role) -> (Account, String) {
        let input = CreateAccount {
            username: username.to_string(),
            email: format!("{username}@campus.edu"),
            role,
            department: Some("Library".to_string()),
        };
        let account = self
            .store
            .insert_account(&input, SEEDED_HASH)
            .await
            .expect("seeding an account should succeed");
        let token = generate_access_token(account.id, role.as_str(), &self.config.jwt)
            .expect("token generation should succeed");
        (account, token)
    }

    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn job_body(title: &str, reward: f64, reward_type: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "description": format!("{title} for the campus library"),
        "reward": reward,
        "reward_type": reward_type,
        "department": "Library",
        "skills_required": ["organization"],
    })
}

/// Post a job through the API and return its JSON representation.
pub async fn post_job(test: &TestApp, token: &str, title: &str, reward: f64) -> serde_json::Value {
    let response = post_json_auth(
        test.app(),
        "/api/v1/jobs",
        job_body(title, reward, "cash"),
        token,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
