//! SQLite pool for the company/employee store.
//!
//! The delete guard on companies leans on `ON DELETE RESTRICT`, which SQLite
//! only enforces with `foreign_keys` switched on, so every pooled connection
//! is prepared by [`ConnectionOptions`] before use.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use log::error;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// PRAGMAs run on each connection the pool hands out.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    /// WAL journal so listings can read while a batch write commits.
    pub enable_wal: bool,
    pub enable_foreign_keys: bool,
    /// How long a writer waits on `SQLITE_BUSY` before giving up.
    pub busy_timeout: Option<Duration>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            enable_wal: true,
            enable_foreign_keys: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ConnectionOptions {
    /// PRAGMA script for these options.
    fn pragmas(&self) -> String {
        let mut script = String::new();
        if self.enable_wal {
            script.push_str("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        if self.enable_foreign_keys {
            script.push_str("PRAGMA foreign_keys = ON;");
        }
        if let Some(timeout) = self.busy_timeout {
            script.push_str(&format!("PRAGMA busy_timeout = {};", timeout.as_millis()));
        }
        script
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let script = self.pragmas();
        if script.is_empty() {
            return Ok(());
        }
        conn.batch_execute(&script)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Pool for `database_url` with the default PRAGMAs.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    establish_connection_pool_with(database_url, ConnectionOptions::default())
}

pub fn establish_connection_pool_with(
    database_url: &str,
    options: ConnectionOptions,
) -> Result<DbPool, PoolError> {
    Pool::builder()
        .connection_customizer(Box::new(options))
        .build(ConnectionManager::<SqliteConnection>::new(database_url))
        .inspect_err(|e| error!("Cannot open store at {database_url}: {e}"))
}

/// Checks out a connection, logging pool exhaustion.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get()
        .inspect_err(|e| error!("No store connection available: {e}"))
}
