//! Animanga catalog CLI application.

use anyhow::{Context, Result};
use catalog::jikan::{SearchParams, TopFilter};
use catalog::{ApiError, Catalog, CoverQuality, JikanClient, MangaDexClient, Season};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::models::{Anime, Manga};
use shared::{Config, Database, DataPaths, FavoritesStore, MediaKind};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "animanga")]
#[command(author, version, about = "Browse the Jikan anime and MangaDex manga catalogs", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Run without a favorites database
    #[arg(long)]
    no_favorites_db: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Top-ranked anime
    Top {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "24")]
        limit: u32,
        /// airing, upcoming, bypopularity or favorite
        #[arg(long)]
        filter: Option<TopFilter>,
    },

    /// Anime of a season (the current one when omitted)
    Seasonal {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        season: Option<Season>,
        /// Page of the live "season now" listing instead
        #[arg(long, conflicts_with_all = ["year", "season"])]
        now: Option<u32>,
    },

    /// Search anime by free text and filters
    SearchAnime {
        query: String,
        #[arg(long = "type")]
        anime_type: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        rating: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        order_by: Option<String>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Anime details with recommendations and first episode page
    Anime { id: u32 },

    /// One page of an anime's episodes
    Episodes {
        id: u32,
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Recommended anime for an anime
    Recommendations { id: u32 },

    /// Most-followed manga
    PopularManga {
        #[arg(long, default_value = "24")]
        limit: u32,
        #[arg(long, default_value = "0")]
        offset: u32,
    },

    /// Search manga by title
    SearchManga {
        title: String,
        #[arg(long, default_value = "24")]
        limit: u32,
        #[arg(long, default_value = "0")]
        offset: u32,
    },

    /// Manga details with the first chapters and cover
    Manga { id: String },

    /// One window of a manga's chapter feed
    Chapters {
        id: String,
        #[arg(long, default_value = "100")]
        limit: u32,
        #[arg(long, default_value = "0")]
        offset: u32,
    },

    /// Cover image URL for a manga cover file
    CoverUrl {
        manga_id: String,
        file_name: String,
        /// original, medium or small
        #[arg(long, default_value = "medium")]
        quality: CoverQuality,
    },

    /// Top anime, this season's anime and popular manga together
    Landing,

    /// Manage local favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
enum FavoritesAction {
    /// Stored ids
    List,
    /// Add an anime or manga id
    Add { kind: MediaKind, id: String },
    /// Remove an anime or manga id
    Remove { kind: MediaKind, id: String },
    /// Whether an id is stored
    Contains { kind: MediaKind, id: String },
    /// Full details for every stored id
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level()
    };

    shared::logging::init(shared::LogConfig {
        log_dir: config.log_dir().to_string_lossy().to_string(),
        component: "animanga".to_string(),
        default_level: log_level,
        console: config.logging.console,
        file: config.logging.file,
        json_format: config.logging.json_format,
    })?;

    info!(config_file = %args.config.display(), "Animanga starting");

    if let Command::InitConfig { force } = args.command {
        return init_config(&args.config, force);
    }

    // Initialize data paths
    let data_paths = DataPaths::new(config.data_dir());
    data_paths
        .create_dirs()
        .context("Failed to create data directories")?;

    // Initialize favorites
    let favorites = if args.no_favorites_db {
        info!("Running without a favorites database");
        FavoritesStore::detached()
    } else {
        let db_path = config.database_path();
        info!(db_path = %db_path.display(), "Opening favorites database");
        let database = Database::open(&db_path).context("Failed to open database")?;
        FavoritesStore::new(database)
    };

    // Initialize API clients
    let jikan = JikanClient::from_config(&config.jikan).context("Failed to create Jikan client")?;
    let mangadex =
        MangaDexClient::from_config(&config.mangadex).context("Failed to create MangaDex client")?;
    let catalog = Catalog::new(jikan, mangadex, favorites);

    // Ctrl-C cancels whatever view is in flight
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            cancel.cancel();
        }
    });

    tokio::select! {
        result = run(args.command, &catalog, &token) => result,
        _ = token.cancelled() => Err(ApiError::Cancelled.into()),
    }
}

async fn run(
    command: Command,
    catalog: &Catalog<JikanClient, MangaDexClient>,
    token: &CancellationToken,
) -> Result<()> {
    let jikan = catalog.anime();
    let mangadex = catalog.manga();

    match command {
        Command::Top {
            page,
            limit,
            filter,
        } => print_json(&jikan.list_top(page, limit, filter).await?),

        Command::Seasonal {
            now: Some(page), ..
        } => print_json(&jikan.list_current_season(page).await?),

        Command::Seasonal { year, season, .. } => {
            print_json(&jikan.list_seasonal(year, season).await?)
        }

        Command::SearchAnime {
            query,
            anime_type,
            status,
            rating,
            genre,
            order_by,
            sort,
            page,
            limit,
        } => {
            let params = SearchParams {
                q: Some(query),
                anime_type,
                status,
                rating,
                genre,
                order_by,
                sort,
                page,
                limit,
            };
            print_json(&jikan.search(&params).await?)
        }

        Command::Anime { id } => print_json(&catalog.load_anime_detail(id, token).await?),

        Command::Episodes { id, page } => print_json(&jikan.get_episodes(id, page).await?),

        Command::Recommendations { id } => {
            print_json(&jikan.get_recommendations(id).await?)
        }

        Command::PopularManga { limit, offset } => {
            print_json(&mangadex.list_popular(limit, offset).await?)
        }

        Command::SearchManga {
            title,
            limit,
            offset,
        } => print_json(&mangadex.search(&title, limit, offset).await?),

        Command::Manga { id } => print_json(&catalog.load_manga_detail(&id, token).await?),

        Command::Chapters { id, limit, offset } => {
            print_json(&mangadex.get_chapters(&id, limit, offset).await?)
        }

        Command::CoverUrl {
            manga_id,
            file_name,
            quality,
        } => print_json(&mangadex.cover_url(&manga_id, &file_name, quality)),

        Command::Landing => print_json(&catalog.load_landing(token).await?),

        Command::Favorites { action } => favorites(action, catalog, token).await,

        Command::InitConfig { .. } => Ok(()),
    }
}

async fn favorites(
    action: FavoritesAction,
    catalog: &Catalog<JikanClient, MangaDexClient>,
    token: &CancellationToken,
) -> Result<()> {
    let store = catalog.favorites();
    if !store.is_attached() {
        warn!("No favorites database attached; favorites are not persisted");
    }

    match action {
        FavoritesAction::List => print_json(&serde_json::json!({
            "anime": store.list::<Anime>(),
            "manga": store.list::<Manga>(),
        })),

        FavoritesAction::Add { kind, id } => {
            match kind {
                MediaKind::Anime => store.add::<Anime>(anime_id(&id)?)?,
                MediaKind::Manga => store.add::<Manga>(id.clone())?,
            }
            info!(kind = %kind, id = %id, "Added favorite");
            print_json(&serde_json::json!({ "kind": kind, "id": id, "favorite": true }))
        }

        FavoritesAction::Remove { kind, id } => {
            match kind {
                MediaKind::Anime => store.remove::<Anime>(&anime_id(&id)?)?,
                MediaKind::Manga => store.remove::<Manga>(&id)?,
            }
            info!(kind = %kind, id = %id, "Removed favorite");
            print_json(&serde_json::json!({ "kind": kind, "id": id, "favorite": false }))
        }

        FavoritesAction::Contains { kind, id } => {
            let favorite = match kind {
                MediaKind::Anime => store.contains::<Anime>(&anime_id(&id)?),
                MediaKind::Manga => store.contains::<Manga>(&id),
            };
            print_json(&serde_json::json!({ "kind": kind, "id": id, "favorite": favorite }))
        }

        FavoritesAction::Show => print_json(&catalog.load_favorites(token).await?),
    }
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    write_default_config(path, force)?;
    print_json(&serde_json::json!({ "written": path }))
}

/// Write built-in defaults to `path`, ignoring whatever is currently loaded
fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save(path)
}

fn anime_id(id: &str) -> Result<u32> {
    id.parse()
        .with_context(|| format!("Invalid anime id: {}", id))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
