use thiserror::Error;

use crate::graph::ResolveError;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ResolveError(#[from] ResolveError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
