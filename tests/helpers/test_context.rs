//! Test context for unified test setup
//!
//! Builds the real router over either a lazily connected pool (for requests
//! that are answered before touching the database) or the test database.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use scholar_hub::config::Settings;
use scholar_hub::database::create_lazy_pool;
use scholar_hub::services::auth::hash_password;
use scholar_hub::{create_router, AppState};

use super::database_helper::TestDatabase;

/// Unified test context that manages all test components
pub struct TestContext {
    pub state: AppState,
    pub router: Router,
    pub database: Option<TestDatabase>,
    pub media_dir: TempDir,
}

/// Response status plus parsed JSON body (`Value::Null` when empty)
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

fn test_settings(media_dir: &TempDir) -> Settings {
    let mut settings = Settings::default();
    settings.database.acquire_timeout_seconds = 2;
    settings.media.public_dir = media_dir.path().to_string_lossy().to_string();
    settings
}

impl TestContext {
    /// Context whose pool never connects unless a request needs it
    pub fn without_database() -> Self {
        let media_dir = TempDir::new().expect("Failed to create media dir");
        let settings = test_settings(&media_dir);
        let pool = create_lazy_pool(&settings.database).expect("Failed to create lazy pool");
        let state = AppState::new(pool, settings);

        Self {
            router: create_router(state.clone()),
            state,
            database: None,
            media_dir,
        }
    }

    /// Context over a fresh test database
    pub async fn with_database() -> Self {
        let database = TestDatabase::new().await;
        let media_dir = TempDir::new().expect("Failed to create media dir");
        let mut settings = test_settings(&media_dir);
        settings.database.url = database.database_url.clone();

        let state = AppState::new(database.pool.clone(), settings);
        state.services.media.ensure_directories().await.expect("Failed to create media directories");

        Self {
            router: create_router(state.clone()),
            state,
            database: Some(database),
            media_dir,
        }
    }

    /// Send a request through the router
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(build_request(Method::GET, uri, cookie, None)).await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(build_request(Method::DELETE, uri, cookie, None)).await
    }

    pub async fn post_json(&self, uri: &str, cookie: Option<&str>, body: &Value) -> TestResponse {
        self.send(build_request(Method::POST, uri, cookie, Some(body))).await
    }

    pub async fn patch_json(&self, uri: &str, cookie: Option<&str>, body: &Value) -> TestResponse {
        self.send(build_request(Method::PATCH, uri, cookie, Some(body))).await
    }

    /// Send a multipart form; `file` is (field, file name, bytes)
    pub async fn send_multipart(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        fields: &[(&str, &str)],
        file: Option<(&str, &str, &[u8])>,
    ) -> TestResponse {
        let boundary = "scholarhub-test-boundary";
        let mut body: Vec<u8> = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    boundary, name, value
                )
                .as_bytes(),
            );
        }
        if let Some((name, file_name, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    boundary, name, file_name
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            );
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).expect("Failed to build request"))
            .await
    }

    /// Create an account with the given role and return its session cookie
    pub async fn login_as(&self, email: &str, role: &str) -> String {
        let password = "rahasia123";
        let hash = hash_password(password).expect("Failed to hash password");
        self.state
            .database
            .users
            .create("Test User", email, &hash, role)
            .await
            .expect("Failed to create user");

        let response = self
            .post_json(
                "/login",
                None,
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);

        let set_cookie = response
            .headers
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .expect("Login did not set a cookie");
        set_cookie
            .split(';')
            .next()
            .expect("Empty cookie")
            .to_string()
    }
}

fn build_request(method: Method, uri: &str, cookie: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("Failed to build request")
}
