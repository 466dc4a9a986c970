//! Catalog fields a rule can filter on, and the static metadata table that
//! drives how each of them is parsed, validated and rendered.

use serde::{Deserialize, Serialize};
use smartlists_common::Error;
use std::fmt;
use std::str::FromStr;

/// Value type of a field. Governs parameter shape and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Free text, matched with substring/prefix/suffix/equality tests.
    Text,
    /// Number compared after a numeric cast.
    Numeric,
    /// Date or timestamp stored as `YYYY-MM-DD[ HH:MM:SS]`.
    Date,
    /// Name of another smart playlist.
    PlaylistReference,
    /// Duration in seconds, entered as a time string.
    Seconds,
    /// Flag tested with the `true`/`false` operators.
    Boolean,
    /// Value drawn from a closed set, matched by set membership.
    TextFromSet,
}

/// Advisory check applied to raw user input for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Decimal number between 0 and 10.
    Rating,
    /// Non-negative integer.
    Count,
    /// Time string (`h:m:s`, `m:s`, seconds, or `<n> min`).
    Time,
}

/// A semantic catalog attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Genre,
    Album,
    Artist,
    AlbumArtist,
    Title,
    Year,
    Time,
    TrackNumber,
    Filename,
    Path,
    PlayCount,
    LastPlayed,
    InProgress,
    Rating,
    Votes,
    Top250,
    Mpaa,
    DateAdded,
    Comment,
    Review,
    Themes,
    Moods,
    Styles,
    AlbumType,
    MusicLabel,
    Plot,
    PlotOutline,
    Tagline,
    Set,
    Director,
    Actor,
    Writers,
    AirDate,
    HasTrailer,
    Studio,
    Country,
    TvShow,
    Status,
    Season,
    Episode,
    EpisodeCount,
    WatchedCount,
    VideoResolution,
    VideoCodec,
    VideoAspect,
    AudioChannels,
    AudioCodec,
    AudioLanguage,
    SubtitleLanguage,
    Tag,
    Playlist,
    VirtualFolder,
}

/// Static metadata for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo {
    pub field: Field,
    /// Wire name used in serialized documents.
    pub name: &'static str,
    pub field_type: FieldType,
    /// English display label.
    pub label: &'static str,
    /// Whether editors can offer a browse list of existing values.
    pub browseable: bool,
    pub validator: Option<Validator>,
}

const fn info(
    field: Field,
    name: &'static str,
    field_type: FieldType,
    label: &'static str,
    browseable: bool,
    validator: Option<Validator>,
) -> FieldInfo {
    FieldInfo {
        field,
        name,
        field_type,
        label,
        browseable,
        validator,
    }
}

use FieldType::*;

pub(crate) const FIELDS: &[FieldInfo] = &[
    info(Field::Genre, "genre", Text, "Genre", true, None),
    info(Field::Album, "album", Text, "Album", true, None),
    info(Field::Artist, "artist", Text, "Artist", true, None),
    info(Field::AlbumArtist, "albumartist", Text, "Album artist", true, None),
    info(Field::Title, "title", Text, "Title", true, None),
    info(Field::Year, "year", Numeric, "Year", true, Some(Validator::Count)),
    info(Field::Time, "time", Seconds, "Duration", false, Some(Validator::Time)),
    info(Field::TrackNumber, "tracknumber", Numeric, "Track number", false, Some(Validator::Count)),
    info(Field::Filename, "filename", Text, "Filename", false, None),
    info(Field::Path, "path", Text, "Path", true, None),
    info(Field::PlayCount, "playcount", Numeric, "Play count", false, Some(Validator::Count)),
    info(Field::LastPlayed, "lastplayed", Date, "Last played", false, None),
    info(Field::InProgress, "inprogress", Boolean, "In progress", false, None),
    info(Field::Rating, "rating", Numeric, "Rating", false, Some(Validator::Rating)),
    info(Field::Votes, "votes", Text, "Votes", false, None),
    info(Field::Top250, "top250", Numeric, "Top 250", false, Some(Validator::Count)),
    info(Field::Mpaa, "mpaarating", Text, "MPAA rating", false, None),
    info(Field::DateAdded, "dateadded", Date, "Date added", false, None),
    info(Field::Comment, "comment", Text, "Comment", false, None),
    info(Field::Review, "review", Text, "Review", false, None),
    info(Field::Themes, "themes", Text, "Themes", false, None),
    info(Field::Moods, "moods", Text, "Moods", false, None),
    info(Field::Styles, "styles", Text, "Styles", false, None),
    info(Field::AlbumType, "type", Text, "Album type", false, None),
    info(Field::MusicLabel, "label", Text, "Label", false, None),
    info(Field::Plot, "plot", Text, "Plot", false, None),
    info(Field::PlotOutline, "plotoutline", Text, "Plot outline", false, None),
    info(Field::Tagline, "tagline", Text, "Tagline", false, None),
    info(Field::Set, "set", Text, "Movie set", true, None),
    info(Field::Director, "director", Text, "Director", true, None),
    info(Field::Actor, "actor", Text, "Actor", true, None),
    info(Field::Writers, "writers", Text, "Writers", true, None),
    info(Field::AirDate, "airdate", Date, "Aired", false, None),
    info(Field::HasTrailer, "hastrailer", Boolean, "Has trailer", false, None),
    info(Field::Studio, "studio", Text, "Studio", true, None),
    info(Field::Country, "country", Text, "Country", true, None),
    info(Field::TvShow, "tvshow", Text, "TV show", true, None),
    info(Field::Status, "status", Text, "Status", false, None),
    info(Field::Season, "season", Numeric, "Season", false, Some(Validator::Count)),
    info(Field::Episode, "episode", Numeric, "Episode", false, Some(Validator::Count)),
    info(Field::EpisodeCount, "numepisodes", Numeric, "Number of episodes", false, Some(Validator::Count)),
    info(Field::WatchedCount, "numwatched", Numeric, "Watched episodes", false, Some(Validator::Count)),
    info(Field::VideoResolution, "videoresolution", Numeric, "Video resolution", false, None),
    info(Field::VideoCodec, "videocodec", TextFromSet, "Video codec", false, None),
    info(Field::VideoAspect, "videoaspect", Numeric, "Video aspect ratio", false, None),
    info(Field::AudioChannels, "audiochannels", Numeric, "Audio channels", false, Some(Validator::Count)),
    info(Field::AudioCodec, "audiocodec", TextFromSet, "Audio codec", false, None),
    info(Field::AudioLanguage, "audiolanguage", TextFromSet, "Audio language", false, None),
    info(Field::SubtitleLanguage, "subtitlelanguage", TextFromSet, "Subtitle language", false, None),
    info(Field::Tag, "tag", Text, "Tag", true, None),
    info(Field::Playlist, "playlist", PlaylistReference, "Playlist", true, None),
    info(Field::VirtualFolder, "virtualfolder", PlaylistReference, "Virtual folder", true, None),
];

impl Field {
    /// Metadata row for this field.
    pub fn info(&self) -> &'static FieldInfo {
        FIELDS
            .iter()
            .find(|row| row.field == *self)
            .unwrap_or(&FIELDS[0])
    }

    /// Wire name used in serialized documents.
    pub fn as_str(&self) -> &'static str {
        self.info().name
    }

    /// English display label.
    pub fn label(&self) -> &'static str {
        self.info().label
    }

    pub fn field_type(&self) -> FieldType {
        self.info().field_type
    }

    pub fn is_browseable(&self) -> bool {
        self.info().browseable
    }

    pub fn validator(&self) -> Option<Validator> {
        self.info().validator
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        FIELDS
            .iter()
            .find(|row| row.name == lower)
            .map(|row| row.field)
            .ok_or_else(|| Error::malformed(format!("unknown field '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn wire_names_are_unique_and_round_trip() {
        let mut seen = HashSet::new();
        for row in FIELDS {
            assert!(seen.insert(row.name), "duplicate field name {}", row.name);
            assert_eq!(row.name.parse::<Field>().unwrap(), row.field);
            assert_eq!(row.field.info().name, row.name);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!("Genre".parse::<Field>().unwrap(), Field::Genre);
        assert_eq!("MPAARATING".parse::<Field>().unwrap(), Field::Mpaa);
        assert!("loudness".parse::<Field>().unwrap_err().is_malformed());
    }

    #[test]
    fn value_types() {
        assert_eq!(Field::Genre.field_type(), FieldType::Text);
        assert_eq!(Field::Rating.field_type(), FieldType::Numeric);
        assert_eq!(Field::Time.field_type(), FieldType::Seconds);
        assert_eq!(Field::LastPlayed.field_type(), FieldType::Date);
        assert_eq!(Field::InProgress.field_type(), FieldType::Boolean);
        assert_eq!(Field::AudioCodec.field_type(), FieldType::TextFromSet);
        assert_eq!(Field::Playlist.field_type(), FieldType::PlaylistReference);
    }

    #[test]
    fn browseable_fields() {
        assert!(Field::Genre.is_browseable());
        assert!(Field::Playlist.is_browseable());
        assert!(!Field::Rating.is_browseable());
    }
}
