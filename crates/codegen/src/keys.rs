/*!
 * Copyright 2025 Supactl Contributors
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Preview branch key generation
//!
//! Generates fresh random key material for a branch and prints it as a set of
//! named variables. Variable names default to the values in [`NAME_FIELDS`] and
//! can be overridden per key through an [`EnvSet`].

use crate::envset::{normalize_key, EnvSet};
use crate::error::{EnvSetError, GenError};
use crate::output::{write_vars, OutputFormat};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore};
use std::collections::BTreeMap;
use std::io::Write;

/// Override key and default variable name of every generated key, in output order
pub const NAME_FIELDS: [(&str, &str); 5] = [
    ("api.url", "NEXT_PUBLIC_SUPABASE_URL"),
    ("db.password", "SUPABASE_DB_PASSWORD"),
    ("auth.jwt_secret", "SUPABASE_AUTH_JWT_SECRET"),
    ("auth.anon_key", "SUPABASE_AUTH_ANON_KEY"),
    ("auth.service_role_key", "SUPABASE_AUTH_SERVICE_ROLE_KEY"),
];

/// Names of the generated key variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomName {
    pub api_url: String,
    pub db_password: String,
    pub jwt_secret: String,
    pub anon_key: String,
    pub service_role_key: String,
}

impl Default for CustomName {
    fn default() -> Self {
        let [api_url, db_password, jwt_secret, anon_key, service_role_key] =
            NAME_FIELDS.map(|(_, name)| name.to_string());
        Self {
            api_url,
            db_password,
            jwt_secret,
            anon_key,
            service_role_key,
        }
    }
}

impl CustomName {
    /// Decode an override set, keeping defaults for keys it doesn't mention.
    ///
    /// # Errors
    ///
    /// Returns [`EnvSetError::UnknownKey`] for keys outside [`NAME_FIELDS`].
    pub fn from_env_set(set: &EnvSet) -> Result<Self, EnvSetError> {
        let mut names = Self::default();
        for (key, value) in set.iter() {
            let slot = match NAME_FIELDS
                .iter()
                .position(|(field, _)| normalize_key(field) == key)
            {
                Some(0) => &mut names.api_url,
                Some(1) => &mut names.db_password,
                Some(2) => &mut names.jwt_secret,
                Some(3) => &mut names.anon_key,
                Some(4) => &mut names.service_role_key,
                _ => {
                    return Err(EnvSetError::UnknownKey {
                        key: key.to_string(),
                        suggestion: closest_field(key),
                    })
                }
            };
            *slot = value.to_string();
        }
        Ok(names)
    }
}

fn closest_field(key: &str) -> Option<String> {
    NAME_FIELDS
        .iter()
        .map(|(field, _)| (strsim::jaro_winkler(&normalize_key(field), key), field))
        .filter(|(score, _)| *score > 0.8)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, field)| field.to_string())
}

/// Random secrets for one branch
#[derive(Debug, Clone)]
pub struct KeyMaterial {
    pub db_password: String,
    pub jwt_secret: String,
    pub anon_key: String,
    pub service_role_key: String,
}

impl KeyMaterial {
    pub fn generate<R: RngCore>(rng: &mut R) -> Self {
        Self {
            db_password: alphanumeric(rng, 32),
            jwt_secret: alphanumeric(rng, 40),
            anon_key: format!("sb_publishable_{}", opaque_token(rng)),
            service_role_key: format!("sb_secret_{}", opaque_token(rng)),
        }
    }
}

fn alphanumeric<R: RngCore>(rng: &mut R, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn opaque_token<R: RngCore>(rng: &mut R) -> String {
    let mut bytes = [0u8; 24];
    rng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Pair every generated value with its configured variable name
pub fn key_vars(
    project_ref: &str,
    material: &KeyMaterial,
    names: &CustomName,
) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            names.api_url.clone(),
            format!("https://{project_ref}.supabase.co"),
        ),
        (names.db_password.clone(), material.db_password.clone()),
        (names.jwt_secret.clone(), material.jwt_secret.clone()),
        (names.anon_key.clone(), material.anon_key.clone()),
        (
            names.service_role_key.clone(),
            material.service_role_key.clone(),
        ),
    ])
}

/// Trait for key generators
pub trait KeyGenerator {
    /// Generate the key variables of `project_ref` and write them to `out`
    fn generate(
        &self,
        project_ref: &str,
        format: OutputFormat,
        names: &CustomName,
        out: &mut dyn Write,
    ) -> Result<(), GenError>;
}

/// Key generator backed by the thread-local RNG
#[derive(Debug, Default)]
pub struct BranchKeyGenerator;

impl KeyGenerator for BranchKeyGenerator {
    fn generate(
        &self,
        project_ref: &str,
        format: OutputFormat,
        names: &CustomName,
        out: &mut dyn Write,
    ) -> Result<(), GenError> {
        let material = KeyMaterial::generate(&mut rand::thread_rng());
        let vars = key_vars(project_ref, &material, names);
        tracing::debug!(project_ref, %format, count = vars.len(), "writing branch keys");
        write_vars(&vars, format, out)
    }
}
