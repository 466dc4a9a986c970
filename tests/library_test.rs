//! Integration tests for configured playlist directories.

mod common;

use common::{sqlite_ctx, ROCK_XSP};
use smartlists::config::load_config;
use smartlists::library::{load_playlist_file, PlaylistDirectory};
use smartlists_rules::PlaylistLookup;
use std::fs;

#[test]
fn configured_directories_resolve_references() {
    let root = tempfile::tempdir().unwrap();
    let shared = root.path().join("shared");
    fs::create_dir_all(shared.join("music")).unwrap();
    fs::write(shared.join("music/rock.xsp"), ROCK_XSP).unwrap();

    let config_path = root.path().join("smartlists.toml");
    fs::write(
        &config_path,
        format!("[library]\nplaylist_dirs = [{:?}]\n", shared.to_str().unwrap()),
    )
    .unwrap();
    let config = load_config(&config_path).unwrap();
    assert_eq!(config.library.playlist_dirs, vec![shared.clone()]);

    let own = root.path().join("loud.json");
    fs::write(
        &own,
        r#"{"name": "Loud", "type": "songs", "rules": [
            {"field": "playlist", "operator": "is", "value": "Rock"},
            {"field": "playcount", "operator": "greaterthan", "value": "3"}
        ]}"#,
    )
    .unwrap();

    let library = PlaylistDirectory::new(config.library.playlist_dirs);
    assert!(library.find("rock").is_some());

    let playlist = load_playlist_file(&own).unwrap();
    let compiled = playlist.compile(&sqlite_ctx(&library));
    assert_eq!(
        compiled.clause,
        "(genre = 'Rock') AND (CAST(IFNULL(playcount, 0) AS REAL) > 3)"
    );
}

#[test]
fn add_dir_ignores_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = PlaylistDirectory::new([dir.path()]);
    library.add_dir(dir.path());
    library.add_dir(dir.path().join("more"));
    assert_eq!(library.dirs().len(), 2);
    assert!(library.files().is_empty());
}
