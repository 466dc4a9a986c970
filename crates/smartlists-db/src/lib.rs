//! Smartlists-DB: SQLite catalog schema, migrations, and queries
//!
//! This crate executes compiled smart playlists against a SQLite media
//! catalog and stores saved playlists, using rusqlite with r2d2 connection
//! pooling.
//!
//! # Modules
//!
//! - `migrations` - Catalog and saved playlist schema
//! - `pool` - Connection pool management
//! - `dialect` - [`SqliteBackend`], the predicate dialect of the catalog
//! - `queries` - Catalog selection and saved playlist CRUD
//! - `store` - [`SqlitePlaylistStore`], cross-reference lookup
//!
//! # Example
//!
//! ```no_run
//! use smartlists_db::pool::{get_conn, init_pool};
//! use smartlists_db::queries::{catalog, playlists};
//! use smartlists_db::{SqliteBackend, SqlitePlaylistStore};
//! use smartlists_rules::CompileContext;
//!
//! let pool = init_pool("/var/lib/smartlists/catalog.sqlite").unwrap();
//! let store = SqlitePlaylistStore::new(pool.clone());
//! let conn = get_conn(&pool).unwrap();
//!
//! let playlist = playlists::get_playlist(&conn, "Jazz").unwrap().unwrap();
//! let compiled = playlist.compile(&CompileContext::new(&SqliteBackend, &store));
//! for item in catalog::playlist_items(&conn, &playlist, &compiled).unwrap() {
//!     println!("{} {}", item.id, item.title);
//! }
//! ```

pub mod dialect;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
pub mod store;

pub use dialect::SqliteBackend;
pub use store::SqlitePlaylistStore;
