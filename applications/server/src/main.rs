/// Grunge Server - Music catalog and playlist HTTP API
use clap::{Parser, Subcommand};
use grunge_core::types::CatalogImport;
use grunge_server::{config::ServerConfig, create_router, state::AppState};
use grunge_storage::Database;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "grunge-server")]
#[command(about = "Grunge music catalog and playlist server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "GRUNGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Load artists, albums and tracks from a JSON document
    Import {
        /// Path to the catalog JSON file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "grunge_server=info,grunge_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::Migrate => migrate(&config).await?,
        Commands::Import { path } => import(&config, &path).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Grunge Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let db = Arc::new(Database::connect(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    // Build router
    let app_state = AppState::new(db, config.api);
    let app = create_router(app_state);

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn migrate(config: &ServerConfig) -> anyhow::Result<()> {
    // Connecting applies migrations
    Database::connect(&config.storage.database_url).await?;
    tracing::info!("Migrations applied to {}", config.storage.database_url);
    Ok(())
}

async fn import(config: &ServerConfig, path: &std::path::Path) -> anyhow::Result<()> {
    let contents = tokio::fs::read_to_string(path).await?;
    let doc: CatalogImport = serde_json::from_str(&contents)?;

    let db = Database::connect(&config.storage.database_url).await?;
    let summary = db.import_catalog(&doc).await?;

    println!(
        "Imported {} artists, {} albums, {} tracks",
        summary.artists, summary.albums, summary.tracks
    );

    Ok(())
}
