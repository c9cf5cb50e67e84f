use std::io;

use enscard::CardError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Could not resolve profile: {0}")]
    ResolveError(String),

    #[error("Could not export card: {0}")]
    ExportError(String),

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    CardError(#[from] CardError),
}
