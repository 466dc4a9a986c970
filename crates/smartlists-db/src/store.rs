//! Cross-reference lookup backed by the saved playlist table.

use smartlists_rules::{PlaylistLookup, SmartPlaylist};
use tracing::warn;

use crate::pool::{get_conn, DbPool};
use crate::queries::playlists;

/// Resolves playlist references against the `smart_playlists` table.
///
/// Lookup failures are logged and treated as "not found", which the
/// compiler reports as an unknown reference.
#[derive(Clone)]
pub struct SqlitePlaylistStore {
    pool: DbPool,
}

impl SqlitePlaylistStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl PlaylistLookup for SqlitePlaylistStore {
    fn find(&self, name: &str) -> Option<SmartPlaylist> {
        let result = get_conn(&self.pool).and_then(|conn| playlists::get_playlist(&conn, name));
        match result {
            Ok(found) => found,
            Err(e) => {
                warn!(playlist = %name, error = %e, "Failed to load referenced playlist");
                None
            }
        }
    }
}
