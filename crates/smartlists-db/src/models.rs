//! Rows returned by the query modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartlists_common::MediaType;

/// Summary of a playlist saved in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlaylist {
    pub name: String,
    pub media_type: MediaType,
    pub updated_at: DateTime<Utc>,
}

/// A catalog row selected by a playlist predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub title: String,
}
