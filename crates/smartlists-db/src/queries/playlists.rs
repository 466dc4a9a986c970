//! Saved smart playlist queries.
//!
//! Playlists are stored as their JSON document, keyed by name. Names compare
//! case-insensitively, matching how cross-references are resolved.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use smartlists_common::{Error, MediaType, Result};
use smartlists_rules::SmartPlaylist;

use crate::models::SavedPlaylist;

/// Insert or replace a playlist.
pub fn save_playlist(conn: &Connection, playlist: &SmartPlaylist) -> Result<()> {
    if playlist.name().trim().is_empty() {
        return Err(Error::invalid_input("cannot save a playlist without a name"));
    }
    let document = playlist.to_json()?;

    conn.execute(
        "INSERT INTO smart_playlists (name, media_type, document, updated_at)
         VALUES (:name, :media_type, :document, :updated_at)
         ON CONFLICT(name) DO UPDATE SET
            name = excluded.name,
            media_type = excluded.media_type,
            document = excluded.document,
            updated_at = excluded.updated_at",
        rusqlite::named_params! {
            ":name": playlist.name(),
            ":media_type": playlist.media_type().as_str(),
            ":document": document,
            ":updated_at": Utc::now().to_rfc3339(),
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(())
}

/// Get a playlist by name.
///
/// # Returns
///
/// * `Ok(Some(SmartPlaylist))` - The playlist if found
/// * `Ok(None)` - If no playlist has that name
/// * `Err(Error)` - If a database error occurs or the stored document no
///   longer parses
pub fn get_playlist(conn: &Connection, name: &str) -> Result<Option<SmartPlaylist>> {
    let document: Option<String> = conn
        .query_row(
            "SELECT document FROM smart_playlists WHERE name = :name",
            rusqlite::named_params! { ":name": name },
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| Error::database(e.to_string()))?;

    document
        .map(|document| SmartPlaylist::from_json(&document))
        .transpose()
}

/// List saved playlists, ordered by name.
pub fn list_playlists(conn: &Connection) -> Result<Vec<SavedPlaylist>> {
    let mut stmt = conn
        .prepare(
            "SELECT name, media_type, updated_at FROM smart_playlists
             ORDER BY name COLLATE NOCASE",
        )
        .map_err(|e| Error::database(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(|e| Error::database(e.to_string()))?;

    let mut playlists = Vec::new();
    for row in rows {
        let (name, media_type, updated_at) = row.map_err(|e| Error::database(e.to_string()))?;
        playlists.push(SavedPlaylist {
            name,
            media_type: media_type.parse::<MediaType>()?,
            updated_at: DateTime::parse_from_rfc3339(&updated_at)
                .map_err(|e| Error::database(format!("bad timestamp '{updated_at}': {e}")))?
                .with_timezone(&Utc),
        });
    }
    Ok(playlists)
}

/// Delete a playlist by name. Returns true if a row was removed.
pub fn delete_playlist(conn: &Connection, name: &str) -> Result<bool> {
    let deleted = conn
        .execute(
            "DELETE FROM smart_playlists WHERE name = :name",
            rusqlite::named_params! { ":name": name },
        )
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(deleted > 0)
}
