mod common;

use axum::http::StatusCode;
use common::{body_json, capture_logs, spawn_app};
use serde_json::json;

fn movie_body(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "Two detectives hunt a serial killer.",
        "releaseYear": 1995,
        "genre": "Thriller",
    })
}

#[tokio::test]
async fn create_then_fetch_a_movie() {
    let app = spawn_app().await;

    let resp = app.post("/movies", movie_body("Se7en")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await["data"].clone();
    assert_eq!(created["title"], "Se7en");
    assert_eq!(created["releaseYear"], 1995);
    assert!(created["createdAt"].is_string());

    let id = created["id"].as_i64().unwrap();
    let fetched = body_json(app.get(&format!("/movies/{id}")).await).await;
    assert_eq!(fetched["data"], created);
}

#[tokio::test]
async fn invalid_movie_bodies_are_rejected() {
    let app = spawn_app().await;

    let cases = [
        json!({
            "title": "",
            "description": "Long enough text.",
            "releaseYear": 2000,
            "genre": "Drama",
        }),
        json!({ "title": "X", "description": "short", "releaseYear": 2000, "genre": "Drama" }),
        json!({
            "title": "X",
            "description": "Long enough text.",
            "releaseYear": 1700,
            "genre": "Drama",
        }),
        json!({ "title": "X", "description": "Long enough text.", "releaseYear": 2000 }),
    ];
    for body in cases {
        let resp = app.post("/movies", body.clone()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        let err = body_json(resp).await;
        assert_eq!(err["error"], "Bad Request");
    }
}

#[tokio::test]
async fn missing_movie_is_404_with_message() {
    let app = spawn_app().await;

    for resp in [
        app.get("/movies/42").await,
        app.patch("/movies/42", json!({ "title": "Nope" })).await,
        app.delete("/movies/42").await,
        app.get("/movies/42/actors").await,
    ] {
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Movie with ID 42 not found");
        assert_eq!(body["statusCode"], 404);
    }
}

#[tokio::test]
async fn non_numeric_id_is_a_bad_request() {
    let app = spawn_app().await;
    let resp = app.get("/movies/abc").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let app = spawn_app().await;
    let id = app.create_movie("Before").await;

    let resp = app.patch(&format!("/movies/{id}"), json!({ "title": "After" })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["title"], "After");
    assert_eq!(body["data"]["genre"], "Drama");

    let resp = app.patch(&format!("/movies/{id}"), json!({ "releaseYear": 3000 })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn resolved_cast_is_logged_at_debug() {
    let app = spawn_app().await;
    let first = app.create_actor("Al Pacino").await;
    let second = app.create_actor("Robert De Niro").await;

    let (logs, _guard) = capture_logs();
    let mut body = movie_body("Heat");
    body["actorIds"] = json!([second, first, second]);
    assert_eq!(app.post("/movies", body).await.status(), StatusCode::CREATED);

    let out = logs.contents();
    let line = out
        .lines()
        .find(|l| l.contains("Actor ids resolved"))
        .unwrap_or_else(|| panic!("no debug line in:\n{out}"));
    assert!(line.contains("DEBUG"), "{line}");
    assert!(line.contains(&format!("\"actorIds\":[{first},{second}]")), "{line}");
    assert!(line.contains("MoviesService"), "{line}");
}

#[tokio::test]
async fn cast_is_set_and_replaced() {
    let app = spawn_app().await;
    let keanu = app.create_actor("Keanu Reeves").await;
    let carrie = app.create_actor("Carrie-Anne Moss").await;
    let hugo = app.create_actor("Hugo Weaving").await;

    let mut body = movie_body("The Matrix");
    body["actorIds"] = json!([keanu, carrie, keanu]);
    let resp = app.post("/movies", body).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

    let cast = body_json(app.get(&format!("/movies/{id}/actors")).await).await;
    let ids: Vec<i64> =
        cast["data"].as_array().unwrap().iter().map(|a| a["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![carrie, keanu]);
    assert_eq!(cast["meta"]["total"], 2);

    let resp = app.patch(&format!("/movies/{id}"), json!({ "actorIds": [hugo] })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cast = body_json(app.get(&format!("/movies/{id}/actors?limit=1")).await).await;
    assert_eq!(cast["data"][0]["id"], hugo);
    assert_eq!(cast["meta"]["hasNext"], false);
}

#[tokio::test]
async fn unknown_actor_ids_are_rejected() {
    let app = spawn_app().await;
    let known = app.create_actor("Known").await;

    let mut body = movie_body("Ghost Cast");
    body["actorIds"] = json!([known, 999]);
    let resp = app.post("/movies", body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["message"].as_str().unwrap().contains("999"));

    let list = body_json(app.get("/movies").await).await;
    assert_eq!(list["meta"]["total"], 0);
}

#[tokio::test]
async fn deleting_a_movie_removes_its_ratings() {
    let app = spawn_app().await;
    let id = app.create_movie("Doomed").await;
    let resp =
        app.post("/movie-ratings", json!({ "score": 4, "comment": "Nice", "movieId": id })).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.delete(&format!("/movies/{id}")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    assert_eq!(app.get(&format!("/movies/{id}")).await.status(), StatusCode::NOT_FOUND);
    let ratings = body_json(app.get("/movie-ratings").await).await;
    assert_eq!(ratings["meta"]["total"], 0);
}
