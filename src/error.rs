use thiserror::Error;

/// Main error type for the stats pipeline and API
#[derive(Error, Debug)]
pub enum HoopcastError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Feed errors
    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Feed result set missing: {0}")]
    MissingResultSet(String),

    // Domain errors
    #[error("Invalid season: {0}")]
    InvalidSeason(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for HoopcastError
pub type Result<T> = std::result::Result<T, HoopcastError>;
