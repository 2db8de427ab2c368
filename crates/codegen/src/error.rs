/*!
 * Copyright 2025 Supactl Contributors
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use thiserror::Error;

/// Top-level error type for the generators
#[derive(Error, Debug)]
pub enum GenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid database URL: {0}")]
    InvalidDbUrl(String),

    #[error("Failed to encode output as {format}: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },

    #[error("Access token not found. Set SUPABASE_ACCESS_TOKEN to generate types for a project")]
    MissingAccessToken,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error retrieving types ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("{program} exited with {status}: {stderr}")]
    Process {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Errors decoding an environment override set into typed names
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvSetError {
    #[error("Malformed override '{0}': expected KEY=NAME")]
    MissingSeparator(String),

    #[error("Malformed override '{0}': key must not be empty")]
    EmptyKey(String),

    #[error("Malformed override for '{0}': name must not be empty")]
    EmptyValue(String),

    #[error("Unknown override key '{key}'{}", suggestion_suffix(.suggestion))]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
    },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(", did you mean '{s}'?"),
        None => String::new(),
    }
}
