//! Shared helpers for integration tests.

use pushkind_leads::db::{DbPool, establish_connection_pool, migrations};
use tempfile::TempDir;

/// Throwaway SQLite database with the embedded migrations applied.
/// The file is removed together with its directory on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create connection pool");
        migrations::run_pending(&pool).expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}
