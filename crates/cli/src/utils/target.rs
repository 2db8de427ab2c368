//! Target resolution for type generation
//!
//! The selected flag first yields a database config: `--local` points at the
//! local database, `--db-url` is parsed, anything else leaves the host empty.
//! A non-empty host resolves straight to a database target. Otherwise the
//! project ref is resolved; a missing link becomes a usage error telling the
//! caller to pick a target, any other failure is passed through unchanged.

use crate::error::{CliError, CliResult};
use crate::session::Session;
use crate::utils::config::read_project_config;
use crate::utils::project_ref::{ProjectRefError, ProjectRefResolver};
use supactl_codegen::{DbConfig, Target};

pub const TARGET_REQUIRED: &str =
    "Must specify one of --local, --linked, --project-id, or --db-url";

/// Target flag given on the command line; at most one is accepted by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelector {
    Local,
    Linked,
    ProjectId(String),
    DbUrl(String),
    Unspecified,
}

impl TargetSelector {
    pub fn from_flags(
        local: bool,
        linked: bool,
        project_id: Option<&str>,
        db_url: Option<&str>,
    ) -> Self {
        if local {
            TargetSelector::Local
        } else if linked {
            TargetSelector::Linked
        } else if let Some(id) = project_id {
            TargetSelector::ProjectId(id.to_string())
        } else if let Some(url) = db_url {
            TargetSelector::DbUrl(url.to_string())
        } else {
            TargetSelector::Unspecified
        }
    }
}

/// Database config implied by `selector`; empty when it names no database
pub fn database_config(selector: &TargetSelector, session: &Session) -> CliResult<DbConfig> {
    match selector {
        TargetSelector::Local => {
            let config = read_project_config(&session.workdir)?;
            Ok(DbConfig::local(config.db.port))
        }
        TargetSelector::DbUrl(db_url) => {
            DbConfig::from_url(db_url).map_err(|e| CliError::Usage(e.to_string()))
        }
        _ => Ok(DbConfig::default()),
    }
}

pub fn resolve_target(
    selector: &TargetSelector,
    session: &Session,
    resolver: &dyn ProjectRefResolver,
) -> CliResult<Target> {
    let db = database_config(selector, session)?;
    if !db.host.is_empty() {
        tracing::debug!(host = %db.host, "database target selected");
        return Ok(Target::Database(db));
    }

    let explicit = match selector {
        TargetSelector::ProjectId(id) => Some(id.as_str()),
        _ => None,
    };
    let interactive = *selector == TargetSelector::Unspecified;
    match resolver.resolve(explicit, session, interactive) {
        Ok(project_ref) => {
            tracing::debug!(project_ref = %project_ref, "project target selected");
            Ok(Target::Project(project_ref))
        }
        Err(ProjectRefError::NotLinked) => Err(CliError::Usage(TARGET_REQUIRED.to_string())),
        Err(e) => Err(e.into()),
    }
}
