// SPDX-License-Identifier: MIT

//! MongoDB client wrapper with typed collection handles.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};

use crate::config::Config;
use crate::db::collections;
use crate::error::AppError;
use crate::models::{User, Workout};

/// Per-operation deadline applied through the driver options. Mutating
/// operations are never retried on timeout (a push or pull could
/// double-apply); reads are safe for the caller to retry.
const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// MongoDB database client.
#[derive(Clone)]
pub struct MongoDb {
    database: Option<Database>,
}

impl MongoDb {
    /// Connect to MongoDB and verify the connection with a ping.
    ///
    /// Fail-fast: callers treat any error here as process-fatal, so a
    /// misconfigured store is caught before serving traffic.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(&config.mongodb_url)
            .await
            .map_err(|e| AppError::Database(format!("Invalid MongoDB URL: {}", e)))?;
        options.app_name = Some("liftlog".to_string());
        options.connect_timeout = Some(STORE_TIMEOUT);
        options.server_selection_timeout = Some(STORE_TIMEOUT);

        let client = Client::with_options(options)
            .map_err(|e| AppError::Database(format!("Failed to create MongoDB client: {}", e)))?;
        let database = client.database(&config.db_name);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::Database(format!("MongoDB ping failed: {}", e)))?;

        tracing::info!(db = %config.db_name, "Connected to MongoDB");

        Ok(Self {
            database: Some(database),
        })
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { database: None }
    }

    /// Helper to get the database or return an error if offline.
    fn get_database(&self) -> Result<&Database, AppError> {
        self.database
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    pub(crate) fn users(&self) -> Result<Collection<User>, AppError> {
        Ok(self.get_database()?.collection(collections::USERS))
    }

    pub(crate) fn workouts(&self) -> Result<Collection<Workout>, AppError> {
        Ok(self.get_database()?.collection(collections::WORKOUTS))
    }

    // ─── Index Manager ───────────────────────────────────────────

    /// Idempotently ensure the indexes the repositories rely on.
    ///
    /// Runs on every startup before traffic is served; index creation
    /// is a no-op when an equivalent index already exists. The unique
    /// indexes are the only thing preventing duplicate registrations
    /// under concurrent requests, and the compound index makes "my
    /// workouts, newest first" an index scan.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let unique = |keys| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build()
        };

        let users = self.users()?;
        users.create_index(unique(doc! { "email": 1 })).await?;
        users.create_index(unique(doc! { "username": 1 })).await?;

        self.workouts()?
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "user_id": 1, "date": -1 })
                    .build(),
            )
            .await?;

        tracing::info!("Indexes ensured");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_db_is_offline() {
        let db = MongoDb::new_mock();

        let err = db.users().err().expect("mock must not hand out handles");
        assert!(matches!(err, AppError::Database(_)));

        let err = db.ensure_indexes().await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
