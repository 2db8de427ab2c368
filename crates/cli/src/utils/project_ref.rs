//! Project reference resolution
//!
//! Sources, in order: the explicit flag value, `SUPABASE_PROJECT_ID`, the
//! linked project file, and an interactive prompt when stdin is a terminal.

use crate::session::Session;
use dialoguer::Input;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

pub const PROJECT_REF_PATH: &str = "supabase/.temp/project-ref";

#[derive(Error, Debug)]
pub enum ProjectRefError {
    #[error("Cannot find project ref. Have you run supactl link?")]
    NotLinked,

    #[error("Invalid project ref format '{0}'. Must be like `abcdefghijklmnopqrst`.")]
    Invalid(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read input: {0}")]
    Prompt(String),
}

/// Resolves the project a command operates on
pub trait ProjectRefResolver {
    /// Resolve a project ref, preferring `explicit` when given.
    ///
    /// `interactive` allows prompting when no other source yields a ref.
    fn resolve(
        &self,
        explicit: Option<&str>,
        session: &Session,
        interactive: bool,
    ) -> Result<String, ProjectRefError>;
}

fn project_ref_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z]{20}$").expect("project ref pattern is valid"))
}

/// Check that `project_ref` looks like a project reference
pub fn validate_project_ref(project_ref: &str) -> Result<String, ProjectRefError> {
    let project_ref = project_ref.trim();
    if project_ref_pattern().is_match(project_ref) {
        Ok(project_ref.to_string())
    } else {
        Err(ProjectRefError::Invalid(project_ref.to_string()))
    }
}

pub fn linked_ref_path(workdir: &Path) -> PathBuf {
    workdir.join(PROJECT_REF_PATH)
}

/// Read the linked project ref under `workdir`, if any
pub fn load_linked_ref(workdir: &Path) -> Result<Option<String>, ProjectRefError> {
    let path = linked_ref_path(workdir);
    match fs::read_to_string(&path) {
        Ok(content) => validate_project_ref(&content).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ProjectRefError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Default resolver backed by the work directory and the terminal
#[derive(Debug, Default)]
pub struct LinkedProjectResolver;

impl ProjectRefResolver for LinkedProjectResolver {
    fn resolve(
        &self,
        explicit: Option<&str>,
        session: &Session,
        interactive: bool,
    ) -> Result<String, ProjectRefError> {
        if let Some(project_ref) = explicit {
            return validate_project_ref(project_ref);
        }
        if let Some(project_ref) = &session.project_id {
            tracing::debug!("using project ref from environment");
            return validate_project_ref(project_ref);
        }
        if let Some(project_ref) = load_linked_ref(&session.workdir)? {
            tracing::debug!(project_ref = %project_ref, "using linked project ref");
            return Ok(project_ref);
        }
        if interactive && atty::is(atty::Stream::Stdin) {
            return prompt_project_ref();
        }
        Err(ProjectRefError::NotLinked)
    }
}

fn prompt_project_ref() -> Result<String, ProjectRefError> {
    let project_ref: String = Input::new()
        .with_prompt("Enter your project ref")
        .validate_with(|input: &String| -> Result<(), String> {
            validate_project_ref(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(|e| ProjectRefError::Prompt(e.to_string()))?;
    validate_project_ref(&project_ref)
}
