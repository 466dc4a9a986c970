//! Playlists stored as files on disk.

use std::path::{Path, PathBuf};

use smartlists_common::{Error, Result};
use smartlists_rules::{Format, PlaylistLookup, SmartPlaylist};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Load a playlist file, choosing the codec from the extension and falling
/// back to the document's first character.
///
/// Documents without a name take the file stem.
pub fn load_playlist_file(path: &Path) -> Result<SmartPlaylist> {
    let document = std::fs::read_to_string(path)?;
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Format::from_extension)
        .or_else(|| Format::sniff(&document))
        .ok_or_else(|| {
            Error::malformed(format!("{} is neither JSON nor XML", path.display()))
        })?;

    let mut playlist = match format {
        Format::Json => SmartPlaylist::from_json(&document),
        Format::Xml => SmartPlaylist::from_xml(&document),
    }
    .map_err(|e| Error::malformed(format!("{}: {e}", path.display())))?;

    if playlist.name().trim().is_empty() {
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            playlist.set_name(stem);
        }
    }
    debug!(path = %path.display(), name = %playlist.name(), "Loaded playlist file");
    Ok(playlist)
}

fn is_playlist_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Format::from_extension)
        .is_some()
}

/// Playlist files found under a set of directories.
///
/// Lookups rescan the directories, so edits on disk are picked up by the
/// next compile.
#[derive(Debug, Clone, Default)]
pub struct PlaylistDirectory {
    dirs: Vec<PathBuf>,
}

impl PlaylistDirectory {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Add a directory if it is not already scanned.
    pub fn add_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        if !self.dirs.contains(&dir) {
            self.dirs.push(dir);
        }
    }

    /// Paths of every playlist file, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .dirs
            .iter()
            .flat_map(|dir| WalkDir::new(dir).follow_links(true))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_playlist_file(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        files.sort();
        files.dedup();
        files
    }

    /// Load every playlist, skipping files that fail to parse.
    pub fn load_all(&self) -> Vec<(PathBuf, SmartPlaylist)> {
        self.files()
            .into_iter()
            .filter_map(|path| match load_playlist_file(&path) {
                Ok(playlist) => Some((path, playlist)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping playlist file");
                    None
                }
            })
            .collect()
    }
}

impl PlaylistLookup for PlaylistDirectory {
    fn find(&self, name: &str) -> Option<SmartPlaylist> {
        let wanted = name.to_lowercase();
        self.load_all()
            .into_iter()
            .map(|(_, playlist)| playlist)
            .find(|playlist| playlist.name().to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartlists_common::MediaType;
    use std::fs;

    const ROCK_XSP: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?>
<smartplaylist type="songs">
    <name>Rock</name>
    <match>all</match>
    <rule field="genre" operator="is">
        <value>Rock</value>
    </rule>
</smartplaylist>
"#;

    #[test]
    fn test_load_by_extension_and_sniff() {
        let dir = tempfile::tempdir().unwrap();
        let xsp = dir.path().join("rock.xsp");
        fs::write(&xsp, ROCK_XSP).unwrap();
        let playlist = load_playlist_file(&xsp).unwrap();
        assert_eq!(playlist.name(), "Rock");
        assert_eq!(playlist.media_type(), MediaType::Songs);

        let untyped = dir.path().join("rock.txt");
        fs::write(&untyped, ROCK_XSP).unwrap();
        assert_eq!(load_playlist_file(&untyped).unwrap().name(), "Rock");
    }

    #[test]
    fn test_unnamed_xml_takes_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Late Night.xsp");
        fs::write(&path, r#"<smartplaylist type="movies"><match>all</match></smartplaylist>"#)
            .unwrap();
        assert_eq!(load_playlist_file(&path).unwrap().name(), "Late Night");
    }

    #[test]
    fn test_unknown_format_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "just some notes").unwrap();
        assert!(load_playlist_file(&path).unwrap_err().is_malformed());
    }

    #[test]
    fn test_find_scans_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("music")).unwrap();
        fs::write(dir.path().join("music/rock.xsp"), ROCK_XSP).unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();
        fs::write(dir.path().join("readme.md"), "# playlists").unwrap();

        let library = PlaylistDirectory::new([dir.path()]);
        assert_eq!(library.files().len(), 2);
        assert_eq!(library.load_all().len(), 1);
        assert_eq!(library.find("ROCK").unwrap().name(), "Rock");
        assert!(library.find("Jazz").is_none());
    }
}
