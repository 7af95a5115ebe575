#![allow(dead_code)]

use axum_test::TestServer;
use rehab_api::application::services::{CatalogService, ContentStore};
use rehab_api::config::Config;
use rehab_api::infrastructure::cache::ResponseCache;
use rehab_api::infrastructure::storage::FsContentStorage;
use rehab_api::routes::app_router;
use rehab_api::state::AppState;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub const NICOTINE_JSON: &str = r#"{
    "title": "Quit Nicotine",
    "reasons": ["Lung health", "Save money"],
    "methods": ["Nicotine replacement", "Cold turkey"],
    "benefits": ["Better breathing"]
}"#;

pub fn write_content(dir: &Path, id: &str, body: &str) {
    fs::write(dir.join(format!("{id}.json")), body).unwrap();
}

/// A temporary content directory seeded with `(id, json)` pairs.
pub fn content_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (id, body) in files {
        write_content(dir.path(), id, body);
    }
    dir
}

/// Defaults with rate limiting off, since test requests carry no peer address.
pub fn test_config(dir: &Path) -> Config {
    Config {
        content_dir: dir.to_path_buf(),
        rate_limit_enabled: false,
        ..Config::default()
    }
}

pub fn create_test_state(config: &Config) -> AppState {
    let storage = Arc::new(FsContentStorage::new(&config.content_dir));

    AppState::new(
        Arc::new(ContentStore::new(storage)),
        Arc::new(CatalogService::new()),
        Arc::new(ResponseCache::new(config.cache_ttl_seconds)),
    )
}

/// Full application router over `dir`, plus the state it shares.
pub fn test_server(dir: &Path) -> (TestServer, AppState) {
    let config = test_config(dir);
    let state = create_test_state(&config);
    let server = TestServer::new(app_router(state.clone(), &config)).unwrap();
    (server, state)
}
