//! Integration tests executing compiled predicates against the SQLite catalog.

mod common;

use common::{seeded_pool, sqlite_ctx, ACTION_JSON, TRAILERS_OR_CLASSICS_JSON};
use smartlists_common::{MediaType, Order, SortBy, SortDirection};
use smartlists_db::pool::get_conn;
use smartlists_db::queries::{catalog, playlists};
use smartlists_db::SqlitePlaylistStore;
use smartlists_rules::{Field, NoPlaylists, Operator, PlaylistLibrary, Rule, SmartPlaylist};

fn titles(playlist: &SmartPlaylist, pool: &smartlists_db::pool::DbPool) -> Vec<String> {
    let compiled = playlist.compile(&sqlite_ctx(&NoPlaylists));
    let conn = get_conn(pool).unwrap();
    let mut titles: Vec<String> =
        catalog::select_matching(&conn, playlist.media_type(), &compiled, None, 0)
            .unwrap()
            .into_iter()
            .map(|item| item.title)
            .collect();
    titles.sort();
    titles
}

fn movies(rules: Vec<Rule>) -> SmartPlaylist {
    let mut playlist = SmartPlaylist::new("Movies", MediaType::Movies);
    for rule in rules {
        playlist.root_mut().push(rule);
    }
    playlist
}

#[test]
fn action_with_high_rating() {
    let pool = seeded_pool();
    let playlist = SmartPlaylist::from_json(ACTION_JSON).unwrap();
    assert_eq!(titles(&playlist, &pool), vec!["Die Hard", "Heat"]);
}

#[test]
fn trailer_or_classic_titles() {
    let pool = seeded_pool();
    let playlist = SmartPlaylist::from_json(TRAILERS_OR_CLASSICS_JSON).unwrap();
    assert_eq!(
        titles(&playlist, &pool),
        vec!["The Expendables", "Toy Story"]
    );
}

#[test]
fn negated_text_and_between() {
    let pool = seeded_pool();
    let playlist = movies(vec![
        Rule::new(Field::Genre, Operator::DoesNotContain, ["Animation"]),
        Rule::new(Field::Year, Operator::Between, ["1985", "1999"]),
    ]);
    assert_eq!(titles(&playlist, &pool), vec!["Die Hard", "Heat"]);
}

#[test]
fn recently_added() {
    let pool = seeded_pool();
    let playlist = movies(vec![Rule::new(
        Field::DateAdded,
        Operator::InTheLast,
        ["2 weeks"],
    )]);
    assert_eq!(titles(&playlist, &pool), vec!["Die Hard", "Toy Story"]);
}

#[test]
fn resolution_classes() {
    let pool = seeded_pool();
    let hd = movies(vec![Rule::new(Field::VideoResolution, Operator::Equals, ["1080"])]);
    assert_eq!(titles(&hd, &pool), vec!["Die Hard", "The Expendables"]);

    let below = movies(vec![Rule::new(Field::VideoResolution, Operator::LessThan, ["1080"])]);
    assert_eq!(titles(&below, &pool), vec!["Heat", "Toy Story"]);
}

#[test]
fn like_patterns_are_escaped() {
    let pool = seeded_pool();
    let playlist = movies(vec![Rule::new(Field::Title, Operator::Contains, ["%"])]);
    assert!(titles(&playlist, &pool).is_empty());
}

#[test]
fn mixed_playlists_read_songs_and_music_videos() {
    let pool = seeded_pool();
    let mut playlist = SmartPlaylist::new("Eighties", MediaType::Mixed);
    playlist
        .root_mut()
        .push(Rule::new(Field::Year, Operator::Between, ["1980", "1989"]));
    assert_eq!(titles(&playlist, &pool), vec!["Back in Black", "Thriller"]);
}

#[test]
fn never_played_counts_null_as_zero() {
    let pool = seeded_pool();
    let mut playlist = SmartPlaylist::new("Unplayed", MediaType::Songs);
    playlist
        .root_mut()
        .push(Rule::new(Field::PlayCount, Operator::Equals, ["0"]));
    assert_eq!(titles(&playlist, &pool), vec!["Back in Black"]);
}

#[test]
fn playlist_items_apply_order_and_limit() {
    let pool = seeded_pool();
    let mut playlist = SmartPlaylist::new("Top", MediaType::Movies);
    let mut order = Order::new(SortBy::Year);
    order.direction = SortDirection::Descending;
    playlist.set_order(order);
    playlist.set_limit(2);

    let compiled = playlist.compile(&sqlite_ctx(&NoPlaylists));
    let conn = get_conn(&pool).unwrap();
    let items = catalog::playlist_items(&conn, &playlist, &compiled).unwrap();
    let titles: Vec<_> = items.into_iter().map(|item| item.title).collect();
    assert_eq!(titles[0], "The Expendables");
    assert_eq!(titles.len(), 2);
}

#[test]
fn saved_playlists_resolve_references() {
    let pool = seeded_pool();
    {
        let conn = get_conn(&pool).unwrap();
        let mut rock = SmartPlaylist::new("Rock", MediaType::Songs);
        rock.root_mut()
            .push(Rule::new(Field::Genre, Operator::Equals, ["Rock"]));
        playlists::save_playlist(&conn, &rock).unwrap();
    }

    let mut old_rock = SmartPlaylist::new("Old rock", MediaType::Songs);
    old_rock
        .root_mut()
        .push(Rule::new(Field::Playlist, Operator::Equals, ["rock"]));
    old_rock
        .root_mut()
        .push(Rule::new(Field::Year, Operator::LessThan, ["1975"]));

    // The in-memory pool holds one connection, so compile before taking it.
    let store = SqlitePlaylistStore::new(pool.clone());
    let compiled = old_rock.compile(&sqlite_ctx(&store));
    assert!(compiled.warnings.is_empty());

    let conn = get_conn(&pool).unwrap();
    let items = catalog::select_matching(&conn, MediaType::Songs, &compiled, None, 0).unwrap();
    let titles: Vec<_> = items.into_iter().map(|item| item.title).collect();
    assert_eq!(titles, vec!["Paranoid"]);
}

#[test]
fn in_memory_library_matches_store_results() {
    let pool = seeded_pool();
    let mut jazz = SmartPlaylist::new("Jazz", MediaType::Songs);
    jazz.root_mut()
        .push(Rule::new(Field::Genre, Operator::Equals, ["Jazz"]));
    let mut not_jazz = SmartPlaylist::new("Not jazz", MediaType::Songs);
    not_jazz
        .root_mut()
        .push(Rule::new(Field::Playlist, Operator::DoesNotEqual, ["Jazz"]));
    let library: PlaylistLibrary = [jazz].into_iter().collect();

    let compiled = not_jazz.compile(&sqlite_ctx(&library));
    let conn = get_conn(&pool).unwrap();
    let mut titles: Vec<_> = catalog::select_matching(&conn, MediaType::Songs, &compiled, None, 0)
        .unwrap()
        .into_iter()
        .map(|item| item.title)
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["Back in Black", "Paranoid"]);
}
