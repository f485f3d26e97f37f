use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use learngate::{
    api::{build_router, AppState},
    auth::{Account, RegisterRequest, TokenPair, UpdateAccount},
    config::{AppConfig, AuthConfig},
    domain::AccountId,
    storage::{
        self,
        repositories::{AccountRepository, SqlxAccountRepository},
        DbPool,
    },
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

/// Signing secret shared by every test app, so tests can mint their own
/// tokens with the codec and have the gateway accept their signature.
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub struct TestApp {
    pub pool: DbPool,
    pub state: AppState,
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub fn repository(&self) -> SqlxAccountRepository {
        SqlxAccountRepository::new(self.pool.clone())
    }

    pub async fn register_account(&self, username: &str, password: &str) -> Account {
        self.state
            .accounts
            .register(RegisterRequest {
                username: username.to_string(),
                password: password.to_string(),
                email: None,
                phone: None,
                full_name: None,
            })
            .await
            .expect("register account")
    }

    pub async fn set_account_flags(&self, id: AccountId, update: UpdateAccount) -> Account {
        self.repository().update_account(id, update).await.expect("update account flags")
    }

    pub async fn login(&self, username: &str, password: &str) -> TokenPair {
        let response = send_request(
            self,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(serde_json::json!({ "username": username, "password": password })),
        )
        .await;
        assert_eq!(response.status(), axum::http::StatusCode::OK, "login should succeed");
        read_json(response).await
    }
}

pub async fn setup_test_app() -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("create sqlite pool");

    storage::run_migrations(&pool).await.expect("run migrations for tests");

    let config = AppConfig {
        auth: AuthConfig { secret: TEST_SECRET.to_string(), ..Default::default() },
        ..Default::default()
    };
    let state = AppState::build(pool.clone(), &config);

    TestApp { pool, state }
}

pub async fn send_request(
    app: &TestApp,
    method: Method,
    path: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = bearer {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = if let Some(json) = body {
        let bytes = serde_json::to_vec(&json).expect("serialize body");
        builder
            .header("content-type", "application/json")
            .body(Body::from(bytes))
            .expect("build request")
    } else {
        builder.body(Body::empty()).expect("build request")
    };

    app.router().oneshot(request).await.expect("request")
}

/// Like [`send_request`] but with full control over the Authorization header.
pub async fn send_request_with_header(
    app: &TestApp,
    method: Method,
    path: &str,
    authorization: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }

    let request = builder.body(Body::empty()).expect("build request");
    app.router().oneshot(request).await.expect("request")
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}
