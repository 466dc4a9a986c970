//! Database query modules.
//!
//! - catalog: catalog items and playlist selection
//! - playlists: saved smart playlists

pub mod catalog;
pub mod playlists;
