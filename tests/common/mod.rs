#![allow(dead_code)]

use std::{
    io,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, header},
    response::Response,
};
use http_body_util::BodyExt;
use marquee::{
    AppState, build_app,
    auth::jwt::JwtKeys,
    config::{Config, LogFormat},
    db::{self, now_sec},
};
use sea_orm::ConnectOptions;
use serde_json::Value;
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

pub const JWT_SECRET: &str = "test-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "Admin@123";

pub fn test_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_ttl_secs: 3600,
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        seed_sample_data: false,
        log_format: LogFormat::Text,
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub token: String,
}

/// Full router over a fresh in-memory database, plus a bearer token for
/// user id 1. No user rows are created.
pub async fn spawn_app() -> TestApp {
    // A single pooled connection keeps every query on the same in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = db::connect_and_migrate(options).await.expect("in-memory database");
    let state = Arc::new(AppState::new(test_config(), db));
    let router = build_app(state.clone());
    let token = JwtKeys::new(JWT_SECRET, 3600).issue(1, ADMIN_EMAIL, now_sec()).unwrap();

    TestApp { router, state, token }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            },
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.call(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response {
        self.call(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> Response {
        self.call(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.call(Method::DELETE, uri, None).await
    }

    /// Creates a movie over HTTP and returns its id.
    pub async fn create_movie(&self, title: &str) -> i64 {
        let resp = self
            .post(
                "/movies",
                serde_json::json!({
                    "title": title,
                    "description": "A movie used in integration tests.",
                    "releaseYear": 2001,
                    "genre": "Drama",
                }),
            )
            .await;
        assert_eq!(resp.status(), 201);
        body_json(resp).await["data"]["id"].as_i64().unwrap()
    }

    pub async fn create_actor(&self, name: &str) -> i64 {
        let resp = self
            .post("/actors", serde_json::json!({ "name": name, "nationality": "Canadian" }))
            .await;
        assert_eq!(resp.status(), 201);
        body_json(resp).await["data"]["id"].as_i64().unwrap()
    }
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// In-memory sink for formatted log output.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Routes this thread's log output into the returned buffer until the guard
/// is dropped. Tests using it must stay on a current-thread runtime.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
