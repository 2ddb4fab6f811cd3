mod common;

use axum::http::StatusCode;
use common::{body_json, spawn_app};
use serde_json::json;

#[tokio::test]
async fn rating_embeds_its_movie() {
    let app = spawn_app().await;
    let movie = app.create_movie("Heat").await;

    let resp = app
        .post("/movie-ratings", json!({ "score": 5, "comment": "Great heist", "movieId": movie }))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let rating = body_json(resp).await["data"].clone();
    assert_eq!(rating["score"], 5);
    assert_eq!(rating["movieId"], movie);
    assert_eq!(rating["movie"]["title"], "Heat");

    let id = rating["id"].as_i64().unwrap();
    let fetched = body_json(app.get(&format!("/movie-ratings/{id}")).await).await;
    assert_eq!(fetched["data"]["movie"]["id"], movie);

    let list = body_json(app.get("/movie-ratings").await).await;
    assert_eq!(list["data"][0]["movie"]["title"], "Heat");
}

#[tokio::test]
async fn rating_for_unknown_movie_is_404() {
    let app = spawn_app().await;
    let resp = app.post("/movie-ratings", json!({ "score": 3, "movieId": 77 })).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["message"], "Movie with ID 77 not found");
}

#[tokio::test]
async fn rating_validation() {
    let app = spawn_app().await;
    let movie = app.create_movie("Rated").await;

    for body in [
        json!({ "score": 0, "movieId": movie }),
        json!({ "score": 6, "movieId": movie }),
        json!({ "score": 3, "comment": "ok", "movieId": movie }),
        json!({ "score": 3, "movieId": 0 }),
    ] {
        let resp = app.post("/movie-ratings", body.clone()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
    }
}

#[tokio::test]
async fn filter_by_movie() {
    let app = spawn_app().await;
    let a = app.create_movie("A").await;
    let b = app.create_movie("B").await;
    for (movie, score) in [(a, 1), (b, 2), (a, 3)] {
        let resp = app.post("/movie-ratings", json!({ "score": score, "movieId": movie })).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let body = body_json(app.get(&format!("/movie-ratings?movieId={a}")).await).await;
    assert_eq!(body["meta"]["total"], 2);
    let scores: Vec<i64> =
        body["data"].as_array().unwrap().iter().map(|r| r["score"].as_i64().unwrap()).collect();
    assert_eq!(scores, vec![3, 1]);
}

#[tokio::test]
async fn update_and_retarget() {
    let app = spawn_app().await;
    let a = app.create_movie("Original").await;
    let b = app.create_movie("Other").await;
    let resp = app.post("/movie-ratings", json!({ "score": 2, "movieId": a })).await;
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

    let resp = app.patch(&format!("/movie-ratings/{id}"), json!({ "movieId": 555 })).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["message"], "Movie with ID 555 not found");

    let resp = app
        .patch(
            &format!("/movie-ratings/{id}"),
            json!({ "movieId": b, "comment": "Better on rewatch" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["movie"]["title"], "Other");
    assert_eq!(body["data"]["comment"], "Better on rewatch");
    assert_eq!(body["data"]["score"], 2);
}

#[tokio::test]
async fn delete_rating() {
    let app = spawn_app().await;
    let movie = app.create_movie("Short lived").await;
    let resp = app.post("/movie-ratings", json!({ "score": 4, "movieId": movie })).await;
    let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

    assert_eq!(app.delete(&format!("/movie-ratings/{id}")).await.status(), StatusCode::NO_CONTENT);

    let resp = app.get(&format!("/movie-ratings/{id}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["message"], format!("Movie rating with ID {id} not found"));
}
