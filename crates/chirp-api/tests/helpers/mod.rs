//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p chirp-api --test images_test`. Storage is an
//! in-memory object store and records live in process memory, so no external services
//! are needed.

#![allow(dead_code)]

pub mod auth;
pub mod fixtures;
pub mod storage;

use axum_test::TestServer;
use chirp_api::setup::routes;
use chirp_api::state::AppState;
use chirp_core::constants::API_PREFIX;
use chirp_core::Config;
use chirp_db::InMemoryImageRecords;
use std::collections::HashMap;
use std::sync::Arc;
use storage::RecordingStorage;

pub const TEST_BUCKET: &str = "chirp-images";
pub const TEST_REGION: &str = "us-west-2";

/// User id seeded into every test app.
pub const ALICE: i32 = 1;
/// Second seeded user, used for ownership checks.
pub const BOB: i32 = 2;
pub const TWEET_ID: i32 = 10;
pub const COMMENT_ID: i32 = 20;

/// API path prefix for tests (e.g. `/api`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// Test application: server plus handles on the in-memory collaborators.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<RecordingStorage>,
    pub records: InMemoryImageRecords,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(max_upload_size_bytes: Option<u64>) -> Config {
    let mut vars: HashMap<&str, String> = HashMap::from([
        ("JWT_SECRET", auth::TEST_JWT_SECRET.to_string()),
        ("DATABASE_URL", "postgresql://localhost/chirp_test".to_string()),
        ("S3_BUCKET", TEST_BUCKET.to_string()),
        ("S3_REGION", TEST_REGION.to_string()),
    ]);
    if let Some(max) = max_upload_size_bytes {
        vars.insert("MAX_UPLOAD_SIZE_BYTES", max.to_string());
    }
    Config::from_vars(|key| vars.get(key).cloned()).expect("test config")
}

/// Build a test app with the default upload limit (5 MiB).
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_limit(None).await
}

pub async fn setup_test_app_with_limit(max_upload_size_bytes: Option<u64>) -> TestApp {
    let config = test_config(max_upload_size_bytes);

    let storage = Arc::new(RecordingStorage::in_memory(TEST_BUCKET, TEST_REGION));
    let records = InMemoryImageRecords::new();
    records.add_user(ALICE).await;
    records.add_user(BOB).await;
    records.add_tweet(TWEET_ID).await;
    records.add_comment(COMMENT_ID).await;

    let state = Arc::new(AppState::new(
        config.clone(),
        storage.clone(),
        Arc::new(records.clone()),
    ));
    let router = routes::setup_routes(&config, state).expect("router");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        records,
    }
}
