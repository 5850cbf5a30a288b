//! Embedded schema migrations applied at startup.
//!
//! The database may still be starting when the server boots, so the first
//! connection is retried a fixed number of times at a fixed interval. Diesel
//! migrations are synchronous and run on the blocking thread pool.

use std::time::Duration;

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};

/// SQL migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// Every attempt failed; carries the last failure.
    #[error("database not ready after {attempts} attempts: {message}")]
    Exhausted { attempts: u32, message: String },

    /// The blocking task running the migrations did not complete.
    #[error("migration task failed: {message}")]
    Task { message: String },
}

/// Retry policy for [`run_migrations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationRetry {
    attempts: u32,
    interval: Duration,
}

impl MigrationRetry {
    /// Create a policy. At least one attempt is always made.
    pub fn new(attempts: u32, interval: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            interval,
        }
    }

    /// Number of attempts before giving up.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Delay between attempts.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for MigrationRetry {
    fn default() -> Self {
        Self::new(30, Duration::from_secs(1))
    }
}

fn apply_pending(database_url: &str) -> Result<usize, String> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| err.to_string())?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| err.to_string())?;
    Ok(applied.len())
}

/// Apply pending migrations, retrying while the database is unavailable.
///
/// Returns the number of migrations applied by the successful attempt.
///
/// # Errors
///
/// Returns [`MigrationError::Exhausted`] once every attempt has failed.
pub async fn run_migrations(
    database_url: &str,
    retry: MigrationRetry,
) -> Result<usize, MigrationError> {
    let mut last_error = String::new();
    for attempt in 1..=retry.attempts {
        let url = database_url.to_owned();
        let outcome = tokio::task::spawn_blocking(move || apply_pending(&url))
            .await
            .map_err(|err| MigrationError::Task {
                message: err.to_string(),
            })?;
        match outcome {
            Ok(applied) => {
                info!(attempt, applied, "database schema is up to date");
                return Ok(applied);
            }
            Err(message) => {
                warn!(attempt, max_attempts = retry.attempts, %message, "database not ready");
                last_error = message;
            }
        }
        if attempt < retry.attempts {
            tokio::time::sleep(retry.interval).await;
        }
    }

    Err(MigrationError::Exhausted {
        attempts: retry.attempts,
        message: last_error,
    })
}
