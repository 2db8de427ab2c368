/*!
 * Copyright 2025 Supactl Contributors
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! TypeScript type generation
//!
//! Schema introspection and type mapping are not done here. Database targets
//! are handed to the postgres-meta container, project targets to the
//! Management API; both return the finished `.ts` source.

use crate::db::DbConfig;
use crate::error::GenError;
use serde::Deserialize;
use std::io::Write;
use std::process::Command;

pub const DEFAULT_PG_META_IMAGE: &str = "supabase/postgres-meta:v0.84.2";
pub const DEFAULT_API_URL: &str = "https://api.supabase.com";
const DEFAULT_SCHEMA: &str = "public";

/// Where types are generated from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A database reachable over a connection URL (local or explicit)
    Database(DbConfig),
    /// A hosted project addressed by its reference
    Project(String),
}

/// Options shared by every type generation request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypesOptions {
    pub schemas: Vec<String>,
    pub postgrest_v9_compat: bool,
}

impl TypesOptions {
    /// Comma separated schema list, `public` when none was given
    pub fn included_schemas(&self) -> String {
        let schemas: Vec<&str> = self
            .schemas
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if schemas.is_empty() {
            DEFAULT_SCHEMA.to_string()
        } else {
            schemas.join(",")
        }
    }
}

/// Trait for type generators
pub trait TypeGenerator {
    /// Generate TypeScript types for `target` and write them to `out`
    fn generate(
        &self,
        target: &Target,
        options: &TypesOptions,
        out: &mut dyn Write,
    ) -> Result<(), GenError>;
}

/// Type generator delegating to postgres-meta or the Management API
#[derive(Debug, Clone)]
pub struct TypeScriptGenerator {
    pub api_url: String,
    pub access_token: Option<String>,
    pub pg_meta_image: String,
}

impl Default for TypeScriptGenerator {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            access_token: None,
            pg_meta_image: DEFAULT_PG_META_IMAGE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TypesResponse {
    types: String,
}

impl TypeScriptGenerator {
    /// Environment handed to the postgres-meta container
    pub fn pg_meta_env(
        db: &DbConfig,
        options: &TypesOptions,
    ) -> Result<Vec<(String, String)>, GenError> {
        Ok(vec![
            ("PG_META_DB_URL".to_string(), db.to_url()?),
            ("PG_META_GENERATE_TYPES".to_string(), "typescript".to_string()),
            (
                "PG_META_GENERATE_TYPES_INCLUDED_SCHEMAS".to_string(),
                options.included_schemas(),
            ),
            (
                "PG_META_GENERATE_TYPES_DETECT_ONE_TO_ONE_RELATIONSHIPS".to_string(),
                (!options.postgrest_v9_compat).to_string(),
            ),
        ])
    }

    /// Arguments of the `docker run` invocation
    ///
    /// Only variable names are listed; docker forwards the values from its own
    /// environment.
    pub fn docker_args(&self, env: &[(String, String)]) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "--rm".to_string(),
            "--network".to_string(),
            "host".to_string(),
        ];
        for (name, _) in env {
            args.push("-e".to_string());
            args.push(name.clone());
        }
        args.push(self.pg_meta_image.clone());
        args.push("node".to_string());
        args.push("dist/server/server.js".to_string());
        args
    }

    /// Management API endpoint returning the types of `project_ref`
    pub fn types_url(&self, project_ref: &str, options: &TypesOptions) -> String {
        format!(
            "{}/v1/projects/{}/types/typescript?included_schemas={}",
            self.api_url.trim_end_matches('/'),
            project_ref,
            options.included_schemas()
        )
    }

    fn generate_from_database(
        &self,
        db: &DbConfig,
        options: &TypesOptions,
        out: &mut dyn Write,
    ) -> Result<(), GenError> {
        let env = Self::pg_meta_env(db, options)?;
        let args = self.docker_args(&env);
        tracing::debug!(image = %self.pg_meta_image, host = %db.host, "running postgres-meta");

        let output = Command::new("docker")
            .args(&args)
            .envs(env.iter().map(|(name, value)| (name, value)))
            .output()?;
        if !output.status.success() {
            return Err(GenError::Process {
                program: "docker".to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        out.write_all(&output.stdout)?;
        Ok(())
    }

    fn generate_from_project(
        &self,
        project_ref: &str,
        options: &TypesOptions,
        out: &mut dyn Write,
    ) -> Result<(), GenError> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(GenError::MissingAccessToken)?;
        let url = self.types_url(project_ref, options);
        tracing::debug!(%url, "requesting types from the Management API");

        let response = reqwest::blocking::Client::new()
            .get(&url)
            .bearer_auth(token)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(GenError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        let body: TypesResponse = response.json()?;
        out.write_all(body.types.as_bytes())?;
        Ok(())
    }
}

impl TypeGenerator for TypeScriptGenerator {
    fn generate(
        &self,
        target: &Target,
        options: &TypesOptions,
        out: &mut dyn Write,
    ) -> Result<(), GenError> {
        match target {
            Target::Database(db) => self.generate_from_database(db, options, out),
            Target::Project(project_ref) => self.generate_from_project(project_ref, options, out),
        }
    }
}
