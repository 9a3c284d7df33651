//! Shared harness for HTTP-level integration tests.
//!
//! Builds the application router exactly as production does (same
//! middleware stack via `build_app_router`), with the storage and
//! text-model boundaries replaced by deterministic fakes.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use daimo_api::auth::jwt::{generate_access_token, JwtConfig};
use daimo_api::config::ServerConfig;
use daimo_api::router::build_app_router;
use daimo_api::state::AppState;
use daimo_db::models::user::{CreateUser, User};
use daimo_db::repositories::UserRepo;
use daimo_llm::{LlmError, TextModel};
use daimo_storage::{ObjectStorage, StorageConfig, StorageError};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Deterministic [`ObjectStorage`] fake: URLs embed the key so tests can
/// assert resolution without AWS.
pub struct FakeStorage;

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn download_url(&self, key: &str) -> Result<String, StorageError> {
        Ok(format!("https://blobs.test/{key}?sig=fake"))
    }

    async fn upload_url(&self, key: &str, _content_type: &str) -> Result<String, StorageError> {
        Ok(format!("https://blobs.test/upload/{key}?sig=fake"))
    }
}

/// [`ObjectStorage`] fake whose presigning always fails, for exercising the
/// "blob unreadable -> storage_url null" path.
pub struct FailingStorage;

#[async_trait]
impl ObjectStorage for FailingStorage {
    async fn download_url(&self, _key: &str) -> Result<String, StorageError> {
        Err(StorageError::Provider("presign refused".to_string()))
    }

    async fn upload_url(&self, _key: &str, _content_type: &str) -> Result<String, StorageError> {
        Err(StorageError::Provider("presign refused".to_string()))
    }
}

/// [`TextModel`] fake returning a canned response.
pub struct FakeTextModel {
    pub response: String,
}

impl FakeTextModel {
    /// A well-formed 10-candidate tag response.
    pub fn tags() -> Self {
        Self {
            response: r#"["robot","bot","android","ai","calm","companionship","learning","play","metallic","friendly"]"#
                .to_string(),
        }
    }

    /// A well-formed character draft response.
    pub fn character_draft() -> Self {
        Self {
            response: r#"{
                "name": "Robo",
                "description": "A cheerful robot companion",
                "voice_prompt": "calm, metallic",
                "first_message_prompt": "Hi! I'm Robo."
            }"#
            .to_string(),
        }
    }
}

#[async_trait]
impl TextModel for FakeTextModel {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        Ok(self.response.clone())
    }
}

/// [`TextModel`] fake whose calls always fail.
pub struct FailingTextModel;

#[async_trait]
impl TextModel for FailingTextModel {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::EmptyResponse)
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
        storage: StorageConfig {
            bucket: "test-bucket".to_string(),
            download_expiry_secs: 3600,
            upload_expiry_secs: 600,
        },
        model: "fake-model".to_string(),
    }
}

/// Build the full application router with the default fakes.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(FakeStorage), Arc::new(FakeTextModel::tags()))
}

/// Build the full application router with explicit provider fakes.
pub fn build_test_app_with(
    pool: PgPool,
    storage: Arc<dyn ObjectStorage>,
    text_model: Arc<dyn TextModel>,
) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
        text_model,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Create a user row directly in the database.
pub async fn seed_user(pool: &PgPool, username: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            role: Some(role.to_string()),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Mint a bearer token for a seeded user, signed with the test secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should not fail at the transport level")
}

pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn patch_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("PATCH")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be collectable");
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert a response is the standard error envelope with the given status
/// and error code.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
    assert!(json["error"].is_string());
}
