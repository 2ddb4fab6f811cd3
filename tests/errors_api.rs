mod common;

use axum::http::StatusCode;
use common::{body_json, capture_logs, spawn_app};
use sea_orm::ConnectionTrait;

#[tokio::test]
async fn store_failure_is_500_and_logged_with_its_cause() {
    let app = spawn_app().await;
    app.state.db.execute_unprepared("DROP TABLE movie_ratings").await.unwrap();

    let (logs, _guard) = capture_logs();
    let resp = app.get("/movie-ratings").await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert_eq!(body["statusCode"], 500);
    assert_eq!(body["message"], "Internal server error");

    let out = logs.contents();
    let line = out
        .lines()
        .find(|l| l.contains("[ERROR] HTTP request failed"))
        .unwrap_or_else(|| panic!("no failure line in:\n{out}"));
    assert!(line.contains("ERROR"), "{line}");
    assert!(out.contains("no such table"), "{out}");
    assert!(!out.contains("[END] HTTP request"), "{out}");
}

#[tokio::test]
async fn client_errors_are_reported_as_failures() {
    let app = spawn_app().await;
    let (logs, _guard) = capture_logs();

    let resp = app.get("/actors/404").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let out = logs.contents();
    assert!(out.contains("Actor not found"), "{out}");
    assert!(out.contains("[ERROR] HTTP request failed"), "{out}");
    assert!(out.contains("Actor with ID 404 not found"), "{out}");

    let line = out.lines().find(|l| l.contains("[ERROR] HTTP request failed")).unwrap();
    assert!(line.contains("stack=Actor with ID 404 not found"), "{line}");
    assert!(out.contains("NotFound { entity: \"Actor\", id: 404 }"), "{out}");
}

#[tokio::test]
async fn handled_requests_log_a_success_tier() {
    let app = spawn_app().await;
    let (logs, _guard) = capture_logs();

    assert_eq!(app.get("/health").await.status(), StatusCode::OK);

    let out = logs.contents();
    assert!(out.contains("[START] HTTP request"), "{out}");
    assert!(out.contains("[END] HTTP request success"), "{out}");
    assert!(out.contains("\"userAgent\":\"unknown\""), "{out}");
    assert!(out.contains("\"ip\":\"unknown\""), "{out}");
}
