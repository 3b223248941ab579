#![allow(dead_code)]

use std::path::PathBuf;

use buildmart::db::{DbPool, establish_connection_pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// SQLite database living in a temporary directory, migrated on creation and
/// removed on drop.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path: PathBuf = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("Non UTF-8 temp path"))
            .expect("Failed to create pool");

        let mut conn = pool.get().expect("Failed to get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}
