/// Common test utilities for integration tests
///
/// Provides shared infrastructure for driving the real router against a
/// PostgreSQL database:
/// - Test context with database pool and app router
/// - Unique user fixtures, so concurrently running tests don't collide
/// - Request helper that calls the router in-process and parses the body
///
/// Tests are skipped (with a notice) when DATABASE_URL is not set.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::{ApiConfig, Config, DatabaseConfig};
use taskdeck_shared::db::migrations;
use taskdeck_shared::models::user::{CreateUser, User, UserRole};
use tower::Service as _;

static FIXTURE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Test context containing the database pool and the app under test
pub struct TestContext {
    pub db: PgPool,
    pub app: Router,
}

impl TestContext {
    /// Creates a new test context against DATABASE_URL
    ///
    /// Returns None (after printing a notice) when DATABASE_URL is not
    /// set, so suites can skip instead of failing on machines without a
    /// database.
    pub async fn new() -> Option<Self> {
        let url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("skipping integration test: DATABASE_URL is not set");
                return None;
            }
        };

        let db = PgPool::connect(&url)
            .await
            .expect("failed to connect to test database");

        migrations::run_migrations(&db)
            .await
            .expect("failed to run migrations");

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Some(TestContext { db, app })
    }

    /// Creates a user with a unique email
    pub async fn create_user(&self, name: &str, role: UserRole) -> User {
        let n = FIXTURE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let email = format!(
            "{}-{}-{}@example.com",
            name.to_lowercase().replace(' ', "."),
            std::process::id(),
            n
        );

        User::create(
            &self.db,
            CreateUser {
                name: name.to_string(),
                email,
                password_hash: "test_hash".to_string(),
                role,
                hire_date: None,
            },
        )
        .await
        .expect("failed to create test user")
    }
}

/// Sends a request to the app and returns status plus parsed JSON body
///
/// Empty bodies (e.g. 204 responses) come back as JSON null.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().call(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Creates a task through the API and returns its JSON representation
pub async fn create_task(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, "POST", "/tasks", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
    json["task"].clone()
}
