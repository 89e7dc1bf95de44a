use thiserror::Error;

/// Errors that can occur while browsing recipes
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Reading or writing the local key-value storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A value could not be encoded or decoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The recipe catalog is not usable (e.g. duplicate ids)
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
