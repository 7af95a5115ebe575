mod common;

use axum::Extension;
use axum::extract::ConnectInfo;
use axum::http::StatusCode;
use axum_test::TestServer;
use rehab_api::config::Config;
use rehab_api::routes::app_router;
use serde_json::{Value, json};
use std::net::SocketAddr;

#[tokio::test]
async fn test_stats_track_hits_and_misses() {
    let dir = common::content_dir(&[("nicotine", common::NICOTINE_JSON)]);
    let (server, _state) = common::test_server(dir.path());

    server.get("/api/addictions/nicotine").await.assert_status_ok();
    server.get("/api/addictions/nicotine").await.assert_status_ok();
    server.get("/api/addictions/types").await.assert_status_ok();

    let response = server.get("/api/cache/stats").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["keys"], 2);
    assert_eq!(json["data"]["hits"], 1);
    assert_eq!(json["data"]["misses"], 2);
    assert_eq!(json["data"]["sets"], 2);
    assert!(json["data"].get("memory").is_some());
}

#[tokio::test]
async fn test_query_string_is_part_of_key() {
    let dir = common::content_dir(&[]);
    let (server, state) = common::test_server(dir.path());

    server.get("/api/addictions/types?v=1").await;
    let response = server.get("/api/addictions/types?v=2").await;

    assert_eq!(response.header("x-cache"), "MISS");
    assert!(
        state
            .response_cache
            .get("GET:/api/addictions/types?v=1")
            .is_some()
    );
    assert_eq!(state.response_cache.stats().keys, 2);
}

#[tokio::test]
async fn test_clear_with_pattern() {
    let dir = common::content_dir(&[
        ("nicotine", common::NICOTINE_JSON),
        ("coffee", r#"{"title":"Coffee"}"#),
    ]);
    let (server, _state) = common::test_server(dir.path());

    server.get("/api/addictions/nicotine").await;
    server.get("/api/addictions/coffee").await;
    server.get("/api/addictions/types").await;

    let response = server
        .delete("/api/cache")
        .add_query_param("pattern", "nicotine")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "success", "cleared": 1 })
    );

    let refetched = server.get("/api/addictions/nicotine").await;
    assert_eq!(refetched.header("x-cache"), "MISS");

    let still_cached = server.get("/api/addictions/coffee").await;
    assert_eq!(still_cached.header("x-cache"), "HIT");
}

#[tokio::test]
async fn test_clear_all() {
    let dir = common::content_dir(&[("nicotine", common::NICOTINE_JSON)]);
    let (server, state) = common::test_server(dir.path());

    server.get("/api/addictions/nicotine").await;
    server.get("/api/addictions/types").await;

    let response = server.delete("/api/cache").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "success", "cleared": "all" })
    );
    assert_eq!(state.response_cache.stats().keys, 0);

    let refetched = server.get("/api/addictions/types").await;
    assert_eq!(refetched.header("x-cache"), "MISS");
}

#[tokio::test]
async fn test_clear_response_cache_keeps_content_cache() {
    let dir = common::content_dir(&[("nicotine", common::NICOTINE_JSON)]);
    let (server, state) = common::test_server(dir.path());

    server.get("/api/addictions/nicotine").await.assert_status_ok();
    server.delete("/api/cache").await.assert_status_ok();
    std::fs::remove_file(dir.path().join("nicotine.json")).unwrap();

    let response = server.get("/api/addictions/nicotine").await;

    response.assert_status_ok();
    assert_eq!(response.header("x-cache"), "MISS");
    assert_eq!(state.content.cached_len(), 1);
}

#[tokio::test]
async fn test_rate_limit_returns_envelope() {
    let dir = common::content_dir(&[]);
    let config = Config {
        rate_limit_enabled: true,
        rate_limit_max: 2,
        rate_limit_window_seconds: 900,
        ..common::test_config(dir.path())
    };
    let state = common::create_test_state(&config);
    let app = app_router(state, &config)
        .layer(Extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000)))));
    let server = TestServer::new(app).unwrap();

    server.get("/api/health-check").await.assert_status_ok();
    server.get("/api/health-check").await.assert_status_ok();

    let response = server.get("/api/health-check").await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Too many requests from this IP");
}
