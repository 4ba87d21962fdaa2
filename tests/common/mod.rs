// SPDX-License-Identifier: MIT

use liftlog::config::Config;
use liftlog::db::MongoDb;
use liftlog::routes::create_router;
use liftlog::AppState;
use std::sync::Arc;

/// Check if a test MongoDB is available via environment variable.
#[allow(dead_code)]
pub fn mongo_available() -> bool {
    std::env::var("LIFTLOG_TEST_MONGODB_URL").is_ok()
}

/// Skip test with message if no test MongoDB is available.
#[macro_export]
macro_rules! require_mongo {
    () => {
        if !crate::common::mongo_available() {
            eprintln!("⚠️  Skipping: LIFTLOG_TEST_MONGODB_URL not set");
            return;
        }
    };
}

/// Connect to the test MongoDB with a database name unique to this
/// test, so concurrent tests never see each other's documents.
#[allow(dead_code)]
pub async fn test_db() -> (MongoDb, Config) {
    let mut config = Config::test_default();
    config.mongodb_url =
        std::env::var("LIFTLOG_TEST_MONGODB_URL").expect("caller must check mongo_available");
    config.db_name = format!(
        "liftlog_test_{}",
        mongodb::bson::oid::ObjectId::new().to_hex()
    );

    let db = MongoDb::connect(&config)
        .await
        .expect("Failed to connect to test MongoDB");
    db.ensure_indexes().await.expect("Failed to ensure indexes");

    (db, config)
}

/// Drop a test database created by `test_db`.
#[allow(dead_code)]
pub async fn drop_test_db(config: &Config) {
    let client = mongodb::Client::with_uri_str(&config.mongodb_url)
        .await
        .expect("Failed to connect for cleanup");
    client
        .database(&config.db_name)
        .drop()
        .await
        .expect("Failed to drop test database");
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> MongoDb {
    MongoDb::new_mock()
}

/// Create a test app with an offline mock store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();

    let state = Arc::new(AppState { config, db });

    (create_router(state.clone()), state)
}
