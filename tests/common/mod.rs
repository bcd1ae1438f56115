#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use chrono::Utc;
use cipher_portal::{
    AppState, InertiaRenderer, RendererState, create_router,
    auth::Claims,
    config::{AppConfig, Env},
    models::User,
    repository::{Repository, RepositoryState},
    routes::route_table,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::{collections::HashMap, sync::Arc, time::SystemTime};
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
pub const TEST_ASSET_VERSION: &str = "test-version";

pub const VERIFIED_USER_ID: Uuid = Uuid::from_u128(1);
pub const UNVERIFIED_USER_ID: Uuid = Uuid::from_u128(2);

// --- Mock Repository ---

/// In-memory user store standing in for Postgres.
#[derive(Default)]
pub struct MockUserRepo {
    pub users: HashMap<Uuid, User>,
}

impl MockUserRepo {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: users.into_iter().map(|user| (user.id, user)).collect(),
        }
    }

    /// One verified and one unverified account.
    pub fn seeded() -> Self {
        Self::with_users(vec![verified_user(), unverified_user()])
    }
}

#[async_trait]
impl Repository for MockUserRepo {
    async fn get_user(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).cloned()
    }
}

pub fn verified_user() -> User {
    User {
        id: VERIFIED_USER_ID,
        email: "verified@example.com".to_string(),
        email_verified_at: Some(Utc::now()),
    }
}

pub fn unverified_user() -> User {
    User {
        id: UNVERIFIED_USER_ID,
        email: "pending@example.com".to_string(),
        email_verified_at: None,
    }
}

// --- Tokens ---

/// Signs a session token for `user_id`. A negative offset yields an already expired token.
pub fn create_token(user_id: Uuid, exp_offset: i64) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let claims = Claims {
        sub: user_id,
        iat: now as usize,
        exp: (now + exp_offset) as usize,
    };

    let key = EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

// --- State & Router ---

pub fn test_config(env: Env) -> AppConfig {
    let mut config = AppConfig::default();
    config.env = env;
    config.jwt_secret = TEST_JWT_SECRET.to_string();
    config.asset_version = TEST_ASSET_VERSION.to_string();
    config
}

pub fn create_app_state(env: Env, repo: MockUserRepo) -> AppState {
    let config = test_config(env);
    let renderer = Arc::new(InertiaRenderer::from_config(&config)) as RendererState;

    AppState {
        repo: Arc::new(repo) as RepositoryState,
        routes: Arc::new(route_table().expect("route table must be valid")),
        renderer,
        config,
    }
}

pub fn test_router() -> Router {
    create_router(create_app_state(Env::Production, MockUserRepo::seeded()))
}

pub fn get(uri: &str) -> axum::http::request::Builder {
    Request::builder().method("GET").uri(uri)
}

/// An Inertia visit from a client running the current assets.
pub fn inertia_get(uri: &str) -> axum::http::request::Builder {
    get(uri)
        .header("x-inertia", "true")
        .header("x-inertia-version", TEST_ASSET_VERSION)
}

pub fn empty(builder: axum::http::request::Builder) -> Request<Body> {
    builder.body(Body::empty()).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
