//! Per-media-type vocabulary tables.
//!
//! These are read-only lookups consumed by loaders (to reject documents that
//! use fields a media type does not have) and by editors (to offer choices).
//! The compiler itself only reads [`Field`] metadata.

use smartlists_common::{GroupBy, MediaType, SortBy};

use crate::field::{Field, FieldType};
use crate::operator::Operator;

const STREAM_FIELDS: [Field; 7] = [
    Field::VideoResolution,
    Field::AudioChannels,
    Field::VideoCodec,
    Field::AudioCodec,
    Field::AudioLanguage,
    Field::SubtitleLanguage,
    Field::VideoAspect,
];

const SONG_FIELDS: &[Field] = &[
    Field::Genre,
    Field::Album,
    Field::Artist,
    Field::AlbumArtist,
    Field::Title,
    Field::Year,
    Field::Time,
    Field::TrackNumber,
    Field::Filename,
    Field::Path,
    Field::PlayCount,
    Field::LastPlayed,
    Field::Rating,
    Field::Comment,
    Field::Moods,
    Field::Playlist,
    Field::VirtualFolder,
];

const ALBUM_FIELDS: &[Field] = &[
    Field::Genre,
    Field::Album,
    Field::Artist,
    Field::AlbumArtist,
    Field::Year,
    Field::Review,
    Field::Themes,
    Field::Moods,
    Field::Styles,
    Field::AlbumType,
    Field::MusicLabel,
    Field::Rating,
    Field::Playlist,
    Field::VirtualFolder,
];

const ARTIST_FIELDS: &[Field] = &[
    Field::Artist,
    Field::Genre,
    Field::Moods,
    Field::Styles,
    Field::Playlist,
    Field::VirtualFolder,
];

const MIXED_FIELDS: &[Field] = &[
    Field::Genre,
    Field::Album,
    Field::Artist,
    Field::Title,
    Field::Year,
    Field::Time,
    Field::Filename,
    Field::Path,
    Field::PlayCount,
    Field::LastPlayed,
    Field::Playlist,
    Field::VirtualFolder,
];

const MOVIE_FIELDS: &[Field] = &[
    Field::Title,
    Field::Plot,
    Field::PlotOutline,
    Field::Tagline,
    Field::Votes,
    Field::Rating,
    Field::Time,
    Field::Writers,
    Field::PlayCount,
    Field::LastPlayed,
    Field::InProgress,
    Field::Genre,
    Field::Country,
    Field::Year,
    Field::Director,
    Field::Actor,
    Field::Mpaa,
    Field::Top250,
    Field::Studio,
    Field::HasTrailer,
    Field::Filename,
    Field::Path,
    Field::Set,
    Field::Tag,
    Field::DateAdded,
    STREAM_FIELDS[0],
    STREAM_FIELDS[1],
    STREAM_FIELDS[2],
    STREAM_FIELDS[3],
    STREAM_FIELDS[4],
    STREAM_FIELDS[5],
    STREAM_FIELDS[6],
    Field::Playlist,
    Field::VirtualFolder,
];

const TVSHOW_FIELDS: &[Field] = &[
    Field::Title,
    Field::Plot,
    Field::Status,
    Field::Votes,
    Field::Rating,
    Field::Year,
    Field::Genre,
    Field::Director,
    Field::Actor,
    Field::EpisodeCount,
    Field::WatchedCount,
    Field::PlayCount,
    Field::Path,
    Field::Studio,
    Field::Mpaa,
    Field::DateAdded,
    Field::Tag,
    Field::Playlist,
    Field::VirtualFolder,
];

const EPISODE_FIELDS: &[Field] = &[
    Field::Title,
    Field::TvShow,
    Field::Plot,
    Field::Votes,
    Field::Rating,
    Field::Time,
    Field::Writers,
    Field::AirDate,
    Field::PlayCount,
    Field::LastPlayed,
    Field::InProgress,
    Field::Genre,
    Field::Year,
    Field::Director,
    Field::Actor,
    Field::Episode,
    Field::Season,
    Field::Filename,
    Field::Path,
    Field::Studio,
    Field::Mpaa,
    Field::DateAdded,
    STREAM_FIELDS[0],
    STREAM_FIELDS[1],
    STREAM_FIELDS[2],
    STREAM_FIELDS[3],
    STREAM_FIELDS[4],
    STREAM_FIELDS[5],
    STREAM_FIELDS[6],
    Field::Playlist,
    Field::VirtualFolder,
];

const MUSICVIDEO_FIELDS: &[Field] = &[
    Field::Title,
    Field::Genre,
    Field::Album,
    Field::Year,
    Field::Artist,
    Field::Filename,
    Field::Path,
    Field::PlayCount,
    Field::LastPlayed,
    Field::Time,
    Field::Director,
    Field::Studio,
    Field::Plot,
    Field::DateAdded,
    STREAM_FIELDS[0],
    STREAM_FIELDS[1],
    STREAM_FIELDS[2],
    STREAM_FIELDS[3],
    STREAM_FIELDS[4],
    STREAM_FIELDS[5],
    STREAM_FIELDS[6],
    Field::Playlist,
    Field::VirtualFolder,
];

/// Fields selectable in a playlist of the given type.
pub fn fields(media_type: MediaType) -> &'static [Field] {
    match media_type {
        MediaType::Songs => SONG_FIELDS,
        MediaType::Albums => ALBUM_FIELDS,
        MediaType::Artists => ARTIST_FIELDS,
        MediaType::Mixed => MIXED_FIELDS,
        MediaType::Movies => MOVIE_FIELDS,
        MediaType::TvShows => TVSHOW_FIELDS,
        MediaType::Episodes => EPISODE_FIELDS,
        MediaType::MusicVideos => MUSICVIDEO_FIELDS,
    }
}

/// Returns true if `field` belongs to the vocabulary of `media_type`.
pub fn supports(media_type: MediaType, field: Field) -> bool {
    fields(media_type).contains(&field)
}

/// Wire names of the fields selectable for the given type.
pub fn available_fields(media_type: MediaType) -> Vec<&'static str> {
    fields(media_type).iter().map(Field::as_str).collect()
}

/// Wire names of every operator.
pub fn available_operators() -> Vec<&'static str> {
    Operator::all().map(|op| op.as_str()).collect()
}

/// Operators allowed for fields of the given value type.
pub fn operators_for(field_type: FieldType) -> &'static [Operator] {
    use Operator::*;
    match field_type {
        FieldType::Text => &[
            Contains,
            DoesNotContain,
            Equals,
            DoesNotEqual,
            StartsWith,
            EndsWith,
        ],
        FieldType::TextFromSet => &[Contains, DoesNotContain],
        FieldType::Numeric | FieldType::Seconds => {
            &[Equals, DoesNotEqual, GreaterThan, LessThan, Between]
        }
        FieldType::Date => &[After, Before, InTheLast, NotInTheLast, Between],
        FieldType::PlaylistReference => &[Equals, DoesNotEqual],
        FieldType::Boolean => &[True, False],
    }
}

/// Returns true if `op` may be applied to `field`.
pub fn allows(field: Field, op: Operator) -> bool {
    operators_for(field.field_type()).contains(&op)
}

/// Sort keys selectable for the given type. `SortBy::None` is always allowed
/// and not listed.
pub fn orders(media_type: MediaType) -> &'static [SortBy] {
    use SortBy::*;
    match media_type {
        MediaType::Songs => &[
            Title, Album, Artist, AlbumArtist, Genre, Year, Time, TrackNumber, Filename, Path,
            PlayCount, LastPlayed, Rating, Random,
        ],
        MediaType::Albums => &[
            Album, Artist, AlbumArtist, Genre, Year, AlbumType, MusicLabel, Rating, Random,
        ],
        MediaType::Artists => &[Artist, Genre, Random],
        MediaType::Mixed => &[
            Title, Album, Artist, Genre, Year, Time, Filename, Path, PlayCount, LastPlayed, Random,
        ],
        MediaType::Movies => &[
            SortTitle, Title, Votes, Rating, Time, PlayCount, LastPlayed, Genre, Country, Year,
            Mpaa, Top250, Studio, Path, DateAdded, Random,
        ],
        MediaType::TvShows => &[
            SortTitle, Title, Votes, Rating, Year, Genre, EpisodeCount, WatchedCount, PlayCount,
            Path, Studio, Mpaa, DateAdded, Random,
        ],
        MediaType::Episodes => &[
            Title, TvShow, Votes, Rating, Time, PlayCount, LastPlayed, Genre, Year, Episode,
            Season, Filename, Path, Studio, Mpaa, DateAdded, Random,
        ],
        MediaType::MusicVideos => &[
            Title, Genre, Album, Year, Artist, Filename, Path, PlayCount, LastPlayed, Time,
            Studio, DateAdded, Random,
        ],
    }
}

/// Returns true if `by` is a legal sort key for the given type.
pub fn allows_order(media_type: MediaType, by: SortBy) -> bool {
    by == SortBy::None || orders(media_type).contains(&by)
}

/// Groupings selectable for the given type.
pub fn groups(media_type: MediaType) -> &'static [GroupBy] {
    use GroupBy::*;
    match media_type {
        MediaType::Songs | MediaType::Mixed | MediaType::Episodes => &[],
        MediaType::Albums => &[Genres, Years, Artists],
        MediaType::Artists => &[Genres],
        MediaType::Movies => &[
            Sets, Genres, Years, Actors, Directors, Writers, Studios, Countries, Tags,
        ],
        MediaType::TvShows => &[Genres, Years, Actors, Directors, Studios, Tags],
        MediaType::MusicVideos => &[Artists, Albums, Genres, Years, Directors, Studios, Tags],
    }
}
