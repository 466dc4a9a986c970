//! Shared helpers for integration tests.
//!
//! Provides a fixed compile clock, sample playlist documents, and a catalog
//! seeded with a handful of movies and songs.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use smartlists_common::MediaType;
use smartlists_db::pool::{get_conn, init_memory_pool, DbPool};
use smartlists_db::queries::catalog;
use smartlists_db::SqliteBackend;
use smartlists_rules::{CompileContext, PlaylistLookup};

/// Clock used for every relative date rule in the tests.
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Compile context over the SQLite dialect with a fixed clock.
pub fn sqlite_ctx(playlists: &dyn PlaylistLookup) -> CompileContext<'_> {
    CompileContext::new(&SqliteBackend, playlists).with_now(fixed_now())
}

pub const ACTION_JSON: &str = r#"{
    "name": "Good Action",
    "type": "movies",
    "match": "all",
    "rules": [
        { "field": "genre", "operator": "contains", "value": "Action" },
        { "field": "rating", "operator": "greaterthan", "value": "7" }
    ]
}"#;

pub const TRAILERS_OR_CLASSICS_JSON: &str = r#"{
    "name": "Trailers or classics",
    "type": "movies",
    "match": "one",
    "rules": [
        { "field": "hastrailer", "operator": "true" },
        {
            "match": "one",
            "rules": [
                { "field": "title", "operator": "startswith", "value": "The" },
                { "field": "studio", "operator": "is", "value": "Pixar" }
            ]
        }
    ]
}"#;

pub const ROCK_XSP: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?>
<smartplaylist type="songs">
    <name>Rock</name>
    <match>all</match>
    <rule field="genre" operator="is">
        <value>Rock</value>
    </rule>
    <order direction="descending">year</order>
    <limit>10</limit>
</smartplaylist>
"#;

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

/// Insert the sample movies and songs.
pub fn seed_catalog(conn: &rusqlite::Connection) {
    let movies = [
        ("Die Hard", "Action / Thriller", 8.2, 1988, 0, "Fox", "2024-06-10 09:00:00", 1920),
        ("The Expendables", "Action", 6.4, 2010, 1, "Lionsgate", "2023-01-01 09:00:00", 1920),
        ("Toy Story", "Animation", 8.3, 1995, 0, "Pixar", "2024-06-12 18:30:00", 1280),
        ("Heat", "Crime / Action", 8.3, 1995, 0, "Warner", "2022-03-05 20:00:00", 720),
    ];
    for (title, genre, rating, year, trailer, studio, added, width) in movies {
        catalog::insert_item(
            conn,
            MediaType::Movies,
            &[
                ("title", text(title)),
                ("genre", text(genre)),
                ("rating", Value::Real(rating)),
                ("year", Value::Integer(year)),
                ("hastrailer", Value::Integer(trailer)),
                ("studio", text(studio)),
                ("dateadded", text(added)),
                ("videowidth", Value::Integer(width)),
            ],
        )
        .unwrap();
    }

    let songs = [
        ("Paranoid", "Rock", 1970, 1),
        ("Back in Black", "Rock", 1980, 0),
        ("So What", "Jazz", 1959, 12),
    ];
    for (title, genre, year, playcount) in songs {
        catalog::insert_item(
            conn,
            MediaType::Songs,
            &[
                ("title", text(title)),
                ("genre", text(genre)),
                ("year", Value::Integer(year)),
                ("playcount", Value::Integer(playcount)),
            ],
        )
        .unwrap();
    }

    catalog::insert_item(
        conn,
        MediaType::MusicVideos,
        &[("title", text("Thriller")), ("genre", text("Pop")), ("year", Value::Integer(1983))],
    )
    .unwrap();
}

/// In-memory catalog with the sample rows.
pub fn seeded_pool() -> DbPool {
    let pool = init_memory_pool().expect("failed to create in-memory pool");
    {
        let conn = get_conn(&pool).unwrap();
        seed_catalog(&conn);
    }
    pool
}
