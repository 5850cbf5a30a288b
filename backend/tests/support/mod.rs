//! Shared helpers for database-backed integration tests.
//!
//! Tests run against the PostgreSQL instance named by
//! `DEPOT_TEST_DATABASE_URL`. When the variable is unset each test prints a
//! skip marker and returns early. The schema is dropped and re-migrated for
//! every test, so tests within one binary are serialised on a process-wide
//! lock.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::time::Duration;

use depot::outbound::persistence::{DbPool, MIGRATIONS, PoolConfig};
use diesel::connection::SimpleConnection as _;
use diesel::{Connection as _, PgConnection};
use diesel_migrations::MigrationHarness as _;
use tokio::sync::{Mutex, MutexGuard};

/// Environment variable naming the scratch database.
pub const TEST_DATABASE_URL_ENV: &str = "DEPOT_TEST_DATABASE_URL";

static DATABASE_LOCK: Mutex<()> = Mutex::const_new(());

/// Exclusive handle on a freshly migrated scratch database.
pub struct TestDatabase {
    url: String,
    _guard: MutexGuard<'static, ()>,
}

impl TestDatabase {
    /// Build a small pool against the scratch database.
    pub async fn pool(&self) -> DbPool {
        let config = PoolConfig::new(&self.url)
            .with_max_size(2)
            .with_min_idle(Some(1))
            .with_connection_timeout(Duration::from_secs(5));
        DbPool::new(config).await.expect("pool builds")
    }

    /// Run raw SQL, for seeding rows the adapters only read.
    pub fn execute(&self, sql: &str) {
        self.try_execute(sql).expect("SQL executes");
    }

    /// Run raw SQL and report the database's verdict.
    pub fn try_execute(&self, sql: &str) -> diesel::QueryResult<()> {
        let mut conn =
            PgConnection::establish(&self.url).expect("test database should be reachable");
        conn.batch_execute(sql)
    }
}

/// Reset the scratch database and apply every migration.
///
/// Returns `None` (after printing a skip marker) when no database is
/// configured.
pub async fn fresh_database() -> Option<TestDatabase> {
    let Ok(url) = std::env::var(TEST_DATABASE_URL_ENV) else {
        eprintln!("SKIP-TEST-DATABASE: {TEST_DATABASE_URL_ENV} is not set");
        return None;
    };
    let guard = DATABASE_LOCK.lock().await;

    let mut conn = PgConnection::establish(&url).expect("test database should be reachable");
    conn.batch_execute("DROP SCHEMA IF EXISTS public CASCADE; CREATE SCHEMA public;")
        .expect("schema reset succeeds");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("migrations apply");

    Some(TestDatabase { url, _guard: guard })
}
