use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hoopcast")]
#[command(version = "0.1.0")]
#[command(about = "NBA stats ETL pipeline and percentile-ranking API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory path
    #[arg(short, long, default_value = "config")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve,
    /// Run database migrations and exit
    Migrate,
    /// Sync the player roster from the stats feed
    SyncPlayers {
        /// Season to sync (e.g. 2024-25)
        #[arg(short, long, default_value = crate::domain::DEFAULT_SEASON)]
        season: String,
    },
    /// Sync per-36 advanced stats for a season
    SyncStats {
        #[arg(short, long, default_value = crate::domain::DEFAULT_SEASON)]
        season: String,
    },
    /// Sync traditional per-game stats for a season
    SyncTraditional {
        #[arg(short, long, default_value = crate::domain::DEFAULT_SEASON)]
        season: String,
    },
    /// Sync on/off-court rating splits for a season
    SyncOnOff {
        #[arg(short, long, default_value = crate::domain::DEFAULT_SEASON)]
        season: String,
    },
    /// Run every sync in order: players, advanced, traditional, on/off
    SyncAll {
        #[arg(short, long, default_value = crate::domain::DEFAULT_SEASON)]
        season: String,
    },
}
