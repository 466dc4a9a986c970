mod cli;

use smartlists::config;
use smartlists::library::{load_playlist_file, PlaylistDirectory};
use smartlists_common::MediaType;
use smartlists_db::pool::{get_conn, init_pool, DbPool};
use smartlists_db::queries::{catalog, playlists};
use smartlists_db::{dialect, SqliteBackend, SqlitePlaylistStore};
use smartlists_rules::{vocabulary, CompileContext, Compiled, Field};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "smartlists=debug,smartlists_rules=debug,smartlists_db=debug".to_string()
        } else {
            "smartlists=info,smartlists_rules=warn,smartlists_db=warn".to_string()
        }
    });

    // stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compile {
            file,
            playlist_dirs,
            date,
            full,
        } => compile_file(
            &file,
            &playlist_dirs,
            date.as_deref(),
            full,
            cli.config.as_deref(),
        ),
        Commands::Convert {
            file,
            format,
            output,
        } => convert_file(&file, format, output.as_deref()),
        Commands::Fields { media_type } => list_fields(&media_type),
        Commands::Validate { field, input } => validate_value(&field, &input),
        Commands::Import { paths, database } => {
            import_playlists(&paths, database, cli.config.as_deref())
        }
        Commands::Query {
            name,
            database,
            json,
        } => query_playlist(&name, database, json, cli.config.as_deref()),
        Commands::Version => {
            println!("smartlists {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn print_warnings(compiled: &Compiled) {
    for warning in &compiled.warnings {
        eprintln!("warning: {}", warning);
    }
}

fn compile_file(
    file: &Path,
    extra_dirs: &[PathBuf],
    date: Option<&str>,
    full: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let playlist = load_playlist_file(file)
        .with_context(|| format!("Failed to load playlist: {:?}", file))?;

    // References resolve against the configured directories, any extra ones,
    // and the playlist's own directory.
    let mut library = PlaylistDirectory::new(config.library.playlist_dirs);
    for dir in extra_dirs {
        library.add_dir(dir);
    }
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => library.add_dir(parent),
        _ => library.add_dir("."),
    }

    let mut ctx = CompileContext::new(&SqliteBackend, &library);
    if let Some(date) = date {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))?;
        let midnight = day
            .and_hms_opt(0, 0, 0)
            .with_context(|| format!("Invalid date '{}'", date))?;
        ctx = ctx.with_now(midnight);
    }

    tracing::info!("Compiling playlist '{}'", playlist.name());
    let compiled = playlist.compile(&ctx);
    print_warnings(&compiled);

    println!("{}", compiled.where_condition());
    if full {
        if let Some(order) = dialect::order_by(&playlist.order(), playlist.media_type()) {
            println!("ORDER BY {}", order);
        }
        if playlist.limit() > 0 {
            println!("LIMIT {}", playlist.limit());
        }
    }

    Ok(())
}

fn convert_file(file: &Path, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let playlist = load_playlist_file(file)
        .with_context(|| format!("Failed to load playlist: {:?}", file))?;

    let document = match format {
        OutputFormat::Json => playlist.to_json()?,
        OutputFormat::Xml => playlist.to_xml()?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("Wrote {:?}", path);
        }
        None => print!("{}", document),
    }

    Ok(())
}

fn list_fields(media_type: &str) -> Result<()> {
    let media_type: MediaType = media_type.parse()?;

    println!("Fields for {}:", media_type);
    for field in vocabulary::fields(media_type) {
        let operators: Vec<&str> = vocabulary::operators_for(field.field_type())
            .iter()
            .map(|op| op.as_str())
            .collect();
        println!("  {:<16} {}", field.as_str(), operators.join(", "));
    }

    let orders: Vec<&str> = vocabulary::orders(media_type)
        .iter()
        .map(|by| by.as_str())
        .collect();
    println!("\nOrders: {}", orders.join(", "));

    let groups: Vec<&str> = vocabulary::groups(media_type)
        .iter()
        .map(|group| group.as_str())
        .collect();
    if groups.is_empty() {
        println!("Groups: (none)");
    } else {
        println!("Groups: {}", groups.join(", "));
    }

    Ok(())
}

fn validate_value(field: &str, input: &str) -> Result<()> {
    let field: Field = field.parse()?;
    if !smartlists_rules::validate(field, input) {
        anyhow::bail!("'{}' is not a valid value for {}", input, field);
    }
    println!("✓ '{}' is a valid value for {}", input, field);
    Ok(())
}

fn open_database(database: Option<PathBuf>, config_path: Option<&Path>) -> Result<DbPool> {
    let database = match database {
        Some(path) => path,
        None => config::load_config_or_default(config_path)?
            .library
            .database
            .context("No database configured; pass --database or set library.database")?,
    };

    tracing::info!("Opening catalog {:?}", database);
    init_pool(&database.to_string_lossy())
        .with_context(|| format!("Failed to open database {:?}", database))
}

fn import_playlists(
    paths: &[PathBuf],
    database: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<()> {
    let pool = open_database(database, config_path)?;
    let conn = get_conn(&pool)?;

    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(PlaylistDirectory::new([path]).files());
        } else {
            files.push(path.clone());
        }
    }

    for file in &files {
        let playlist = load_playlist_file(file)
            .with_context(|| format!("Failed to load playlist: {:?}", file))?;
        playlists::save_playlist(&conn, &playlist)
            .with_context(|| format!("Failed to save playlist '{}'", playlist.name()))?;
        println!("Imported '{}' ({})", playlist.name(), playlist.media_type());
    }

    println!("Imported {} playlists", files.len());
    Ok(())
}

fn query_playlist(
    name: &str,
    database: Option<PathBuf>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let pool = open_database(database, config_path)?;
    let store = SqlitePlaylistStore::new(pool.clone());
    let conn = get_conn(&pool)?;

    let playlist = playlists::get_playlist(&conn, name)?
        .with_context(|| format!("No saved playlist named '{}'", name))?;

    let compiled = playlist.compile(&CompileContext::new(&SqliteBackend, &store));
    print_warnings(&compiled);
    tracing::debug!("WHERE {}", compiled.where_condition());

    let items = catalog::playlist_items(&conn, &playlist, &compiled)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in &items {
            println!("{}\t{}", item.id, item.title);
        }
    }

    Ok(())
}
