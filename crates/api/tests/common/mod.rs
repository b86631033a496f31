#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use quanda_api::auth::jwt::{sign_claims, Claims, JwtConfig};
use quanda_api::config::ServerConfig;
use quanda_api::router::build_app_router;
use quanda_api::state::AppState;
use quanda_core::reputation::ReputationConfig;
use quanda_core::roles::{ROLE_ADMIN, ROLE_MEMBER};
use quanda_db::models::user::{CreateUser, User};
use quanda_db::repositories::{ProfileRepo, UserRepo};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults and the default reputation knobs.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            leeway_secs: 0,
        },
        reputation: ReputationConfig::default(),
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Identities
// ---------------------------------------------------------------------------

/// A registered user together with a valid bearer token.
pub struct TestUser {
    pub user: User,
    pub token: String,
}

async fn register(pool: &PgPool, username: &str, role: &str) -> TestUser {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            role: Some(role.to_string()),
        },
    )
    .await
    .expect("user creation should succeed");
    let claims = Claims::for_user(user.id, &user.role, chrono::Duration::minutes(15));
    let token = sign_claims(&claims, &test_config().jwt).expect("signing should succeed");
    TestUser { user, token }
}

pub async fn member(pool: &PgPool, username: &str) -> TestUser {
    register(pool, username, ROLE_MEMBER).await
}

pub async fn admin(pool: &PgPool, username: &str) -> TestUser {
    register(pool, username, ROLE_ADMIN).await
}

/// A member whose base reputation clears every voting threshold.
pub async fn trusted_member(pool: &PgPool, username: &str) -> TestUser {
    let user = member(pool, username).await;
    ProfileRepo::set_base_reputation(pool, user.user.id, 1_000)
        .await
        .expect("setting base reputation should succeed");
    user
}

// ---------------------------------------------------------------------------
// Requests
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
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
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
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
