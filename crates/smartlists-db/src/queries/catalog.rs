//! Catalog queries: inserting items and selecting the ones a compiled
//! playlist matches.

use rusqlite::types::Value;
use rusqlite::Connection;
use smartlists_common::{Error, MediaType, Result};
use smartlists_rules::{Compiled, SmartPlaylist};
use tracing::debug;

use crate::dialect::{order_by, table, title_column};
use crate::models::CatalogItem;

/// Insert a catalog item. `columns` pairs schema column names with values.
///
/// Mixed playlists read from a view and cannot be inserted into.
pub fn insert_item(
    conn: &Connection,
    media_type: MediaType,
    columns: &[(&str, Value)],
) -> Result<i64> {
    if media_type == MediaType::Mixed {
        return Err(Error::invalid_input(
            "mixed items are stored as songs or music videos",
        ));
    }
    if columns.is_empty() {
        return Err(Error::invalid_input("an item needs at least one column"));
    }

    let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table(media_type),
        names.join(", "),
        placeholders.join(", ")
    );

    conn.execute(
        &sql,
        rusqlite::params_from_iter(columns.iter().map(|(_, value)| value)),
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

/// Count the items of a media type.
pub fn count_items(conn: &Connection, media_type: MediaType) -> Result<i64> {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", table(media_type)),
        [],
        |row| row.get(0),
    )
    .map_err(|e| Error::database(e.to_string()))
}

/// Select the items matching `compiled` in the table of `media_type`.
///
/// An empty clause matches everything. `limit` of 0 means unlimited.
pub fn select_matching(
    conn: &Connection,
    media_type: MediaType,
    compiled: &Compiled,
    order: Option<&str>,
    limit: u32,
) -> Result<Vec<CatalogItem>> {
    let mut sql = format!(
        "SELECT id, {} FROM {} WHERE {}",
        title_column(media_type),
        table(media_type),
        compiled.where_condition()
    );
    if let Some(order) = order {
        sql.push_str(" ORDER BY ");
        sql.push_str(order);
    }
    if limit > 0 {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    debug!(%sql, "Selecting catalog items");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| Error::database(format!("{e} in: {sql}")))?;
    let items = stmt
        .query_map([], |row| {
            Ok(CatalogItem {
                id: row.get(0)?,
                title: row.get(1)?,
            })
        })
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(items)
}

/// Select the items of a playlist, applying its order and limit.
pub fn playlist_items(
    conn: &Connection,
    playlist: &SmartPlaylist,
    compiled: &Compiled,
) -> Result<Vec<CatalogItem>> {
    let order = order_by(&playlist.order(), playlist.media_type());
    select_matching(
        conn,
        playlist.media_type(),
        compiled,
        order.as_deref(),
        playlist.limit(),
    )
}
