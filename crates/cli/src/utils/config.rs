//! Project config file reading utilities

use crate::error::{CliError, CliResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use supactl_codegen::db::DEFAULT_LOCAL_DB_PORT;

pub const CONFIG_PATH: &str = "supabase/config.toml";

/// `[db]` section of the project config
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DbSection {
    #[serde(default = "default_db_port")]
    pub port: u16,
}

impl Default for DbSection {
    fn default() -> Self {
        Self {
            port: default_db_port(),
        }
    }
}

fn default_db_port() -> u16 {
    DEFAULT_LOCAL_DB_PORT
}

/// Project config file structure
///
/// Only the keys the CLI reads are modelled; everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub db: DbSection,
}

pub fn config_path(workdir: &Path) -> PathBuf {
    workdir.join(CONFIG_PATH)
}

/// Read the project config under `workdir`, falling back to defaults when absent
pub fn read_project_config(workdir: &Path) -> CliResult<ProjectConfig> {
    let path = config_path(workdir);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| CliError::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| CliError::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
