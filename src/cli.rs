use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smartlists")]
#[command(author, version, about = "Smart playlist rule compiler for media catalogs")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Xml,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a playlist file into a SQL predicate
    Compile {
        /// Playlist file (.xsp or .json)
        #[arg(required = true)]
        file: PathBuf,

        /// Extra directory to search for referenced playlists
        #[arg(long = "playlist-dir")]
        playlist_dirs: Vec<PathBuf>,

        /// Evaluate relative dates against this day (YYYY-MM-DD) instead of today
        #[arg(long)]
        date: Option<String>,

        /// Also print the ORDER BY and LIMIT clauses
        #[arg(long)]
        full: bool,
    },

    /// Convert a playlist file between JSON and XML
    Convert {
        /// Playlist file (.xsp or .json)
        #[arg(required = true)]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the fields, orders and groups available for a media type
    Fields {
        /// Media type (songs, albums, artists, mixed, movies, tvshows,
        /// episodes, musicvideos)
        media_type: String,
    },

    /// Check a rule value against the validator of a field
    Validate {
        /// Field name, e.g. rating or time
        field: String,

        /// Value to check
        input: String,
    },

    /// Save playlist files into the catalog database
    Import {
        /// Playlist files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Catalog database (overrides the config file)
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Run a saved playlist against the catalog database
    Query {
        /// Saved playlist name
        name: String,

        /// Catalog database (overrides the config file)
        #[arg(long)]
        database: Option<PathBuf>,

        /// Output items as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}
