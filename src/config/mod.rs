mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    expand_paths(&mut config.library);
    validate_config(&config);

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./smartlists.toml",
        "~/.config/smartlists/config.toml",
        "/etc/smartlists/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

fn expand(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(raw) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
        None => path.to_path_buf(),
    }
}

fn expand_paths(library: &mut LibraryConfig) {
    for dir in library.playlist_dirs.iter_mut() {
        *dir = expand(dir);
    }
    if let Some(database) = library.database.as_mut() {
        *database = expand(database);
    }
}

fn validate_config(config: &Config) {
    for dir in &config.library.playlist_dirs {
        if !dir.is_dir() {
            tracing::warn!("Playlist directory does not exist: {:?}", dir);
        }
    }
}
