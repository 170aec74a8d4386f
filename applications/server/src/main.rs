/// Playlist Server - REST service for playlists and their songs
use clap::{Parser, Subcommand};
use playlist_core::PlaylistRepository;
use playlist_server::{build_app, config::ServerConfig};
use playlist_storage::SqlitePlaylistRepository;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "playlist-server")]
#[command(about = "Playlist REST server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "PLAYLIST_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Apply database migrations and exit
    Migrate {
        /// Configuration file path
        #[arg(short, long, env = "PLAYLIST_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Print stored playlists
    List {
        /// Configuration file path
        #[arg(short, long, env = "PLAYLIST_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "playlist_server=info,playlist_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(load_config(config)?).await?;
        }
        Commands::Migrate { config } => {
            migrate(load_config(config)?).await?;
        }
        Commands::List { config } => {
            list_playlists(load_config(config)?).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load(path.as_deref())?;
    config.validate()?;
    Ok(config)
}

async fn open_repository(config: &ServerConfig) -> anyhow::Result<SqlitePlaylistRepository> {
    ensure_database_dir(&config.storage.database_url).await?;

    let pool = playlist_storage::create_pool(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    playlist_storage::run_migrations(&pool).await?;
    tracing::info!("Database ready at {}", config.storage.database_url);

    Ok(SqlitePlaylistRepository::new(pool))
}

/// SQLite creates the database file but not its directory
async fn ensure_database_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }

    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Playlist Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let repository: Arc<dyn PlaylistRepository> = Arc::new(open_repository(&config).await?);

    // Build router
    let app = build_app(&config, repository)?;

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);
    tracing::info!("API documentation at http://{}/swagger-ui/", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn migrate(config: ServerConfig) -> anyhow::Result<()> {
    open_repository(&config).await?;
    println!("Migrations applied to {}", config.storage.database_url);
    Ok(())
}

async fn list_playlists(config: ServerConfig) -> anyhow::Result<()> {
    let repository = open_repository(&config).await?;
    let playlists = repository.find_all().await?;

    println!("Playlists:");
    for playlist in playlists {
        println!(
            "  {} - {} song(s) (version {})",
            playlist.name,
            playlist.songs().len(),
            playlist.version
        );
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
