//! Database connection pool management.
//!
//! Pools are built with r2d2 and run pending migrations before they are
//! handed out.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use smartlists_common::{Error, Result};

use crate::migrations;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

fn build(manager: SqliteConnectionManager, max_size: u32) -> Result<DbPool> {
    let manager = manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create connection pool: {}", e)))?;

    let conn = pool
        .get()
        .map_err(|e| Error::database(format!("Failed to get connection for migrations: {}", e)))?;

    migrations::run_migrations(&conn)
        .map_err(|e| Error::database(format!("Failed to run migrations: {}", e)))?;

    Ok(pool)
}

/// Open (creating if needed) the database at `db_path` and migrate it.
///
/// # Example
///
/// ```no_run
/// use smartlists_db::pool::init_pool;
///
/// let pool = init_pool("/var/lib/smartlists/catalog.sqlite").unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_pool(db_path: &str) -> Result<DbPool> {
    build(SqliteConnectionManager::file(db_path), 4)
}

/// Initialize an in-memory database pool for testing.
///
/// Every in-memory connection is its own database, so this pool holds a
/// single connection.
///
/// ```
/// use smartlists_db::pool::{get_conn, init_memory_pool};
///
/// let pool = init_memory_pool().unwrap();
/// let conn = get_conn(&pool).unwrap();
/// ```
pub fn init_memory_pool() -> Result<DbPool> {
    build(SqliteConnectionManager::memory(), 1)
}

/// Get a connection from the pool.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {}", e)))
}
