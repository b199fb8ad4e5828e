//! Fixtures for repository tests.

use std::sync::Arc;

use chrono::Utc;
use tempfile::TempDir;
use tally_core::users::{NewUser, UserRepositoryTrait};

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::users::UserRepository;

/// A migrated database in a temporary directory.
pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    _dir: TempDir,
}

impl TestDb {
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally-test.db");
        let db_path = init(path.to_str().unwrap()).unwrap();
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone());
        TestDb {
            pool,
            writer,
            _dir: dir,
        }
    }
}

/// Inserts a user named `username` and returns its id.
pub async fn seed_user(db: &TestDb, username: &str) -> String {
    let repo = UserRepository::new(db.pool.clone(), db.writer.clone());
    repo.create(NewUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "not-a-real-hash".to_string(),
        created_at: Utc::now(),
    })
    .await
    .unwrap()
    .id
}
