//! CLI error types

use crate::utils::project_ref::ProjectRefError;
use supactl_codegen::{EnvSetError, GenError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid flag combination or missing target
    #[error("{0}")]
    Usage(String),

    /// Environment overlay could not be decoded
    #[error("Invalid name overrides: {0}")]
    Overrides(#[from] EnvSetError),

    #[error("Failed to load {path}: {message}")]
    Config { path: String, message: String },

    #[error(transparent)]
    ProjectRef(#[from] ProjectRefError),

    #[error(transparent)]
    Generator(#[from] GenError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Message(String),
}

pub type CliResult<T> = Result<T, CliError>;
