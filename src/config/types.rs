use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Directories scanned for `.xsp` and `.json` playlists when resolving
    /// cross-references
    #[serde(default)]
    pub playlist_dirs: Vec<PathBuf>,

    /// SQLite catalog used by `import` and `query`
    #[serde(default)]
    pub database: Option<PathBuf>,
}
