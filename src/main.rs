use clap::Parser;
use hoopcast::api::{create_router, AppState};
use hoopcast::cli::{Cli, Commands};
use hoopcast::config::AppConfig;
use hoopcast::domain::Season;
use hoopcast::error::{HoopcastError, Result};
use hoopcast::feed::StatsFeedClient;
use hoopcast::store::PostgresStore;
use hoopcast::sync;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config)?;
    init_logging(&config);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("config error: {error}");
        }
        return Err(HoopcastError::Internal(
            "invalid configuration".to_string(),
        ));
    }

    match &cli.command {
        Commands::Serve => run_server(&config).await,
        Commands::Migrate => {
            let store = connect(&config).await?;
            store.migrate().await
        }
        Commands::SyncPlayers { season } => {
            let (feed, store, season) = sync_setup(&config, season).await?;
            let report = sync::sync_players(&feed, &store, &season).await?;
            info!("Player sync: {report}");
            Ok(())
        }
        Commands::SyncStats { season } => {
            let (feed, store, season) = sync_setup(&config, season).await?;
            let report = sync::sync_advanced(&feed, &store, &season).await?;
            info!("Advanced stats sync: {report}");
            Ok(())
        }
        Commands::SyncTraditional { season } => {
            let (feed, store, season) = sync_setup(&config, season).await?;
            let report = sync::sync_traditional(&feed, &store, &season).await?;
            info!("Traditional stats sync: {report}");
            Ok(())
        }
        Commands::SyncOnOff { season } => {
            let (feed, store, season) = sync_setup(&config, season).await?;
            let report = sync::sync_on_off(&feed, &store, &season).await?;
            info!("On/off stats sync: {report}");
            Ok(())
        }
        Commands::SyncAll { season } => {
            let (feed, store, season) = sync_setup(&config, season).await?;
            sync::sync_all(&feed, &store, &season).await
        }
    }
}

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn connect(config: &AppConfig) -> Result<PostgresStore> {
    let url = config.database.connect_url()?;
    PostgresStore::new(&url, config.database.max_connections).await
}

async fn sync_setup(
    config: &AppConfig,
    season: &str,
) -> Result<(StatsFeedClient, PostgresStore, Season)> {
    let season: Season = season.parse()?;
    let feed = StatsFeedClient::new(&config.feed)?;
    let store = connect(config).await?;
    store.migrate().await?;
    Ok((feed, store, season))
}

async fn run_server(config: &AppConfig) -> Result<()> {
    let store = connect(config).await?;
    store.migrate().await?;

    let state = AppState::new(Arc::new(store));
    let router = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API listening on {addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
