mod common;

use common::{body_json, spawn_app, test_config};
use marquee::seed;

#[tokio::test]
async fn seeding_twice_is_idempotent() {
    let app = spawn_app().await;
    let config = marquee::config::Config { seed_sample_data: true, ..test_config() };
    let state = &app.state;

    seed::run(&state.db, &state.users, &config, &state.logger).await.unwrap();

    let movies = body_json(app.get("/movies?limit=1").await).await["meta"]["total"].clone();
    let actors = body_json(app.get("/actors").await).await["meta"]["total"].clone();
    let ratings = body_json(app.get("/movie-ratings").await).await["meta"]["total"].clone();
    assert_eq!(movies, 33);
    assert_eq!(actors, 12);
    assert!(ratings.as_u64().unwrap() > 33);

    seed::run(&state.db, &state.users, &config, &state.logger).await.unwrap();

    assert_eq!(body_json(app.get("/movies?limit=1").await).await["meta"]["total"], movies);
    assert_eq!(body_json(app.get("/actors").await).await["meta"]["total"], actors);
    assert_eq!(body_json(app.get("/movie-ratings").await).await["meta"]["total"], ratings);

    let admin = state.users.find_by_email(&config.admin_email).await.unwrap().unwrap();
    assert_eq!(admin.role, "admin");
}

#[tokio::test]
async fn synthetic_titles_are_searchable() {
    let app = spawn_app().await;
    let config = marquee::config::Config { seed_sample_data: true, ..test_config() };
    seed::run(&app.state.db, &app.state.users, &config, &app.state.logger).await.unwrap();

    let body = body_json(app.get("/movies?title=Seed%20Movie%20001").await).await;
    assert_eq!(body["meta"]["total"], 1);
    let id = body["data"][0]["id"].as_i64().unwrap();

    let cast = body_json(app.get(&format!("/movies/{id}/actors")).await).await;
    let n = cast["meta"]["total"].as_u64().unwrap();
    assert!((2..=4).contains(&n));
}
