//! Per-invocation session state
//!
//! Built once by the root pre-run hook from the global flags and a snapshot of
//! the process environment. Nothing here is process-wide.

use crate::error::{CliError, CliResult};
use std::collections::BTreeMap;
use std::path::PathBuf;
use supactl_codegen::typescript::{DEFAULT_API_URL, DEFAULT_PG_META_IMAGE};

pub const ACCESS_TOKEN_ENV: &str = "SUPABASE_ACCESS_TOKEN";
pub const API_URL_ENV: &str = "SUPABASE_API_URL";
pub const PROJECT_ID_ENV: &str = "SUPABASE_PROJECT_ID";
pub const PG_META_IMAGE_ENV: &str = "SUPABASE_PG_META_IMAGE";

/// Snapshot of environment variables taken at startup
pub type Environment = BTreeMap<String, String>;

pub fn process_environment() -> Environment {
    std::env::vars().collect()
}

/// Flags shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub workdir: Option<PathBuf>,
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub workdir: PathBuf,
    pub access_token: Option<String>,
    pub api_url: String,
    pub project_id: Option<String>,
    pub pg_meta_image: String,
}

impl Session {
    /// Resolve the work directory and read credentials from `env`.
    ///
    /// # Errors
    ///
    /// Returns an error if the work directory doesn't exist.
    pub fn load(global: &GlobalOptions, env: &Environment) -> CliResult<Self> {
        let workdir = match &global.workdir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        if !workdir.is_dir() {
            return Err(CliError::Usage(format!(
                "Work directory not found: {}",
                workdir.display()
            )));
        }

        let non_empty = |name: &str| {
            env.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            workdir,
            access_token: non_empty(ACCESS_TOKEN_ENV),
            api_url: non_empty(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            project_id: non_empty(PROJECT_ID_ENV),
            pg_meta_image: non_empty(PG_META_IMAGE_ENV)
                .unwrap_or_else(|| DEFAULT_PG_META_IMAGE.to_string()),
        })
    }
}
