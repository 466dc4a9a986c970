//! Playlist media types.
//!
//! A smart playlist always targets exactly one media type. The type decides
//! which fields, sort keys and groupings are available, and which other
//! playlists it may pull in by reference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Kind of catalog entry a playlist selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Individual music tracks.
    Songs,
    /// Music albums.
    Albums,
    /// Music artists.
    Artists,
    /// Songs and music videos together.
    Mixed,
    /// Movies.
    Movies,
    /// TV shows.
    TvShows,
    /// TV episodes.
    Episodes,
    /// Music videos.
    MusicVideos,
}

impl MediaType {
    /// Every media type, in display order.
    pub const ALL: [MediaType; 8] = [
        MediaType::Songs,
        MediaType::Albums,
        MediaType::Artists,
        MediaType::Mixed,
        MediaType::Movies,
        MediaType::TvShows,
        MediaType::Episodes,
        MediaType::MusicVideos,
    ];

    /// Wire name used in serialized documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Songs => "songs",
            Self::Albums => "albums",
            Self::Artists => "artists",
            Self::Mixed => "mixed",
            Self::Movies => "movies",
            Self::TvShows => "tvshows",
            Self::Episodes => "episodes",
            Self::MusicVideos => "musicvideos",
        }
    }

    /// Returns true for the music family (mixed belongs to both families).
    pub fn is_music(&self) -> bool {
        matches!(
            self,
            Self::Songs | Self::Albums | Self::Artists | Self::Mixed
        )
    }

    /// Returns true for the video family (mixed belongs to both families).
    pub fn is_video(&self) -> bool {
        matches!(
            self,
            Self::Movies | Self::TvShows | Self::Episodes | Self::MusicVideos | Self::Mixed
        )
    }

    /// Whether a playlist of type `self` may inline a playlist of type `other`.
    ///
    /// Identical types are compatible, and mixed is compatible with every type
    /// in both directions. No other pairing is.
    pub fn is_compatible_with(&self, other: MediaType) -> bool {
        *self == other || *self == Self::Mixed || other == Self::Mixed
    }

    /// Directory name under which playlists of this type are stored.
    pub fn save_location(&self) -> &'static str {
        match self {
            Self::Mixed => "mixed",
            t if t.is_music() => "music",
            _ => "video",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        MediaType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| Error::UnknownMediaType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        for media_type in MediaType::ALL {
            let parsed: MediaType = media_type.to_string().parse().unwrap();
            assert_eq!(parsed, media_type);
        }
        assert_eq!("TVShows".parse::<MediaType>().unwrap(), MediaType::TvShows);
        assert!("podcasts".parse::<MediaType>().is_err());
    }

    #[test]
    fn families() {
        assert!(MediaType::Songs.is_music());
        assert!(!MediaType::Songs.is_video());
        assert!(MediaType::Episodes.is_video());
        assert!(MediaType::Mixed.is_music() && MediaType::Mixed.is_video());
    }

    #[test]
    fn compatibility_table() {
        assert!(MediaType::Movies.is_compatible_with(MediaType::Movies));
        assert!(MediaType::Movies.is_compatible_with(MediaType::Mixed));
        assert!(MediaType::Mixed.is_compatible_with(MediaType::Songs));
        assert!(MediaType::Songs.is_compatible_with(MediaType::Mixed));
        assert!(!MediaType::Movies.is_compatible_with(MediaType::Songs));
        assert!(!MediaType::Movies.is_compatible_with(MediaType::Episodes));
        assert!(!MediaType::Albums.is_compatible_with(MediaType::Songs));
    }

    #[test]
    fn save_locations() {
        assert_eq!(MediaType::Mixed.save_location(), "mixed");
        assert_eq!(MediaType::Albums.save_location(), "music");
        assert_eq!(MediaType::TvShows.save_location(), "video");
    }
}
