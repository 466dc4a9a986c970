//! Sort order requested by a playlist.
//!
//! The engine only records what ordering was asked for; executing the sort
//! is up to whoever runs the compiled query.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Sort key of a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortBy {
    /// No explicit ordering.
    #[default]
    None,
    Random,
    Title,
    SortTitle,
    Album,
    Artist,
    AlbumArtist,
    Genre,
    Year,
    Time,
    TrackNumber,
    Filename,
    Path,
    PlayCount,
    LastPlayed,
    Rating,
    Votes,
    Top250,
    Mpaa,
    DateAdded,
    Studio,
    Country,
    TvShow,
    Season,
    Episode,
    EpisodeCount,
    WatchedCount,
    AlbumType,
    MusicLabel,
}

/// Wire name and English label for every sort key.
const SORT_KEYS: &[(SortBy, &str, &str)] = &[
    (SortBy::None, "none", "None"),
    (SortBy::Random, "random", "Random"),
    (SortBy::Title, "title", "Title"),
    (SortBy::SortTitle, "sorttitle", "Sort title"),
    (SortBy::Album, "album", "Album"),
    (SortBy::Artist, "artist", "Artist"),
    (SortBy::AlbumArtist, "albumartist", "Album artist"),
    (SortBy::Genre, "genre", "Genre"),
    (SortBy::Year, "year", "Year"),
    (SortBy::Time, "time", "Duration"),
    (SortBy::TrackNumber, "tracknumber", "Track number"),
    (SortBy::Filename, "filename", "Filename"),
    (SortBy::Path, "path", "Path"),
    (SortBy::PlayCount, "playcount", "Play count"),
    (SortBy::LastPlayed, "lastplayed", "Last played"),
    (SortBy::Rating, "rating", "Rating"),
    (SortBy::Votes, "votes", "Votes"),
    (SortBy::Top250, "top250", "Top 250"),
    (SortBy::Mpaa, "mpaarating", "MPAA rating"),
    (SortBy::DateAdded, "dateadded", "Date added"),
    (SortBy::Studio, "studio", "Studio"),
    (SortBy::Country, "country", "Country"),
    (SortBy::TvShow, "tvshow", "TV show"),
    (SortBy::Season, "season", "Season"),
    (SortBy::Episode, "episode", "Episode"),
    (SortBy::EpisodeCount, "numepisodes", "Number of episodes"),
    (SortBy::WatchedCount, "numwatched", "Watched episodes"),
    (SortBy::AlbumType, "type", "Album type"),
    (SortBy::MusicLabel, "label", "Label"),
];

impl SortBy {
    fn entry(&self) -> &'static (SortBy, &'static str, &'static str) {
        SORT_KEYS
            .iter()
            .find(|(key, _, _)| key == self)
            .unwrap_or(&SORT_KEYS[0])
    }

    /// Wire name used in serialized documents.
    pub fn as_str(&self) -> &'static str {
        self.entry().1
    }

    /// English display label.
    pub fn label(&self) -> &'static str {
        self.entry().2
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        SORT_KEYS
            .iter()
            .find(|(_, name, _)| *name == lower)
            .map(|(key, _, _)| *key)
            .ok_or_else(|| Error::malformed(format!("unknown sort order '{s}'")))
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Wire name used in serialized documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" => Ok(Self::Ascending),
            "descending" => Ok(Self::Descending),
            _ => Err(Error::malformed(format!("unknown sort direction '{s}'"))),
        }
    }
}

/// Modifiers applied when comparing sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortAttributes {
    /// Skip leading articles ("The", "A") when comparing.
    pub ignore_article: bool,
    /// Sort folders together with files instead of first.
    pub ignore_folders: bool,
}

impl SortAttributes {
    /// Returns true when no attribute is set.
    pub fn is_empty(&self) -> bool {
        !self.ignore_article && !self.ignore_folders
    }
}

/// The complete ordering request of a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Order {
    pub by: SortBy,
    pub direction: SortDirection,
    pub attributes: SortAttributes,
}

impl Order {
    /// Ordering by `by` in ascending direction with no attributes.
    pub fn new(by: SortBy) -> Self {
        Self {
            by,
            ..Default::default()
        }
    }

    /// Returns true when nothing beyond the defaults was requested.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
