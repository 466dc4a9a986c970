//! SQLite rendering of playlist predicates for the catalog schema.

use smartlists_common::{MediaType, Order, SortBy, SortDirection};
use smartlists_rules::{vocabulary, Backend, Field};

/// Catalog table (or view) holding items of `media_type`.
pub fn table(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Songs => "songs",
        MediaType::Albums => "albums",
        MediaType::Artists => "artists",
        MediaType::Mixed => "mixedview",
        MediaType::Movies => "movies",
        MediaType::TvShows => "tvshows",
        MediaType::Episodes => "episodes",
        MediaType::MusicVideos => "musicvideos",
    }
}

/// Column that stores `field`. Cross-reference fields have none.
pub fn column_name(field: Field) -> Option<&'static str> {
    let name = match field {
        Field::Playlist | Field::VirtualFolder => return None,
        Field::Time => "duration",
        Field::AlbumType => "albumtype",
        Field::Set => "setname",
        Field::VideoResolution => "videowidth",
        other => other.as_str(),
    };
    Some(name)
}

/// Column used as the display title of rows in `media_type`.
pub fn title_column(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Albums => "album",
        MediaType::Artists => "artist",
        _ => "title",
    }
}

/// [`Backend`] for the bundled SQLite catalog schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteBackend;

impl Backend for SqliteBackend {
    fn column(&self, field: Field, media_type: MediaType) -> Option<String> {
        if !vocabulary::supports(media_type, field) {
            return None;
        }
        let column = column_name(field)?;
        Some(match field {
            Field::PlayCount => format!("IFNULL({column}, 0)"),
            _ => column.to_string(),
        })
    }

    fn numeric(&self, expr: &str) -> String {
        format!("CAST({expr} AS REAL)")
    }
}

fn sort_field(by: SortBy) -> Option<Field> {
    let field = match by {
        SortBy::None | SortBy::Random => return None,
        SortBy::Title | SortBy::SortTitle => Field::Title,
        SortBy::Album => Field::Album,
        SortBy::Artist => Field::Artist,
        SortBy::AlbumArtist => Field::AlbumArtist,
        SortBy::Genre => Field::Genre,
        SortBy::Year => Field::Year,
        SortBy::Time => Field::Time,
        SortBy::TrackNumber => Field::TrackNumber,
        SortBy::Filename => Field::Filename,
        SortBy::Path => Field::Path,
        SortBy::PlayCount => Field::PlayCount,
        SortBy::LastPlayed => Field::LastPlayed,
        SortBy::Rating => Field::Rating,
        SortBy::Votes => Field::Votes,
        SortBy::Top250 => Field::Top250,
        SortBy::Mpaa => Field::Mpaa,
        SortBy::DateAdded => Field::DateAdded,
        SortBy::Studio => Field::Studio,
        SortBy::Country => Field::Country,
        SortBy::TvShow => Field::TvShow,
        SortBy::Season => Field::Season,
        SortBy::Episode => Field::Episode,
        SortBy::EpisodeCount => Field::EpisodeCount,
        SortBy::WatchedCount => Field::WatchedCount,
        SortBy::AlbumType => Field::AlbumType,
        SortBy::MusicLabel => Field::MusicLabel,
    };
    Some(field)
}

/// `ORDER BY` expression for a playlist order, if the catalog can sort by it.
pub fn order_by(order: &Order, media_type: MediaType) -> Option<String> {
    if order.by == SortBy::Random {
        return Some("RANDOM()".to_string());
    }
    let column = SqliteBackend.column(sort_field(order.by)?, media_type)?;
    let key = if order.attributes.ignore_article {
        format!(
            "CASE WHEN {column} LIKE 'the %' THEN substr({column}, 5) \
             WHEN {column} LIKE 'a %' THEN substr({column}, 3) ELSE {column} END"
        )
    } else {
        column
    };
    let direction = match order.direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };
    Some(format!("{key} {direction}"))
}
