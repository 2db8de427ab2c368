/*!
 * Copyright 2025 Supactl Contributors
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Encoding of generated variables

use crate::error::GenError;
use clap::ValueEnum;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

/// Output format of key variables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Env,
    Json,
    Toml,
    Yaml,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Env => "env",
            OutputFormat::Json => "json",
            OutputFormat::Toml => "toml",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode `vars` in `format`; entries come out sorted by name.
pub fn encode(vars: &BTreeMap<String, String>, format: OutputFormat) -> Result<String, GenError> {
    let encode_err = |message: String| GenError::Encode {
        format: format.as_str(),
        message,
    };
    match format {
        OutputFormat::Env => Ok(vars
            .iter()
            .map(|(name, value)| format!("{name}=\"{}\"\n", escape_env(value)))
            .collect()),
        OutputFormat::Json => serde_json::to_string_pretty(vars)
            .map(|s| s + "\n")
            .map_err(|e| encode_err(e.to_string())),
        OutputFormat::Toml => toml::to_string(vars).map_err(|e| encode_err(e.to_string())),
        OutputFormat::Yaml => serde_yaml::to_string(vars).map_err(|e| encode_err(e.to_string())),
    }
}

/// Encode `vars` and write them to `out`
pub fn write_vars(
    vars: &BTreeMap<String, String>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), GenError> {
    let encoded = encode(vars, format)?;
    out.write_all(encoded.as_bytes())?;
    Ok(())
}

fn escape_env(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}
