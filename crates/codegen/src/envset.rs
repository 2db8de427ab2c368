/*!
 * Copyright 2025 Supactl Contributors
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Environment override sets
//!
//! An [`EnvSet`] collects `KEY=VALUE` pairs from two sources: explicit entries
//! (the `--override-name` flag) and process environment variables carrying a
//! fixed prefix. Explicit entries win over the environment.
//!
//! Keys are normalized on insertion (lower case, `.` replaced by `_`) so that
//! `auth.anon_key=X` and `SUPABASE_GEN_KEYS_AUTH_ANON_KEY=X` address the same entry.

use crate::error::EnvSetError;
use std::collections::BTreeMap;

/// Ordered mapping of override key to value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSet {
    vars: BTreeMap<String, String>,
}

impl EnvSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `KEY=VALUE` entries, splitting on the first `=`.
    ///
    /// # Errors
    ///
    /// Returns an error for entries without `=` or with an empty key or value.
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self, EnvSetError> {
        let mut set = Self::new();
        for entry in entries {
            let entry = entry.as_ref();
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| EnvSetError::MissingSeparator(entry.to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(EnvSetError::EmptyKey(entry.to_string()));
            }
            if value.trim().is_empty() {
                return Err(EnvSetError::EmptyValue(key.to_string()));
            }
            set.vars.insert(normalize_key(key), value.trim().to_string());
        }
        Ok(set)
    }

    /// Collect variables starting with `prefix`, keyed by the lower-cased remainder.
    ///
    /// `SUPABASE_GEN_KEYS_AUTH_ANON_KEY=X` with prefix `SUPABASE_GEN_KEYS_`
    /// becomes `auth_anon_key=X`. Empty values are rejected like explicit entries.
    pub fn from_vars<I, K, V>(vars: I, prefix: &str) -> Result<Self, EnvSetError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut set = Self::new();
        for (name, value) in vars {
            let Some(rest) = name.as_ref().strip_prefix(prefix) else {
                continue;
            };
            if rest.is_empty() {
                return Err(EnvSetError::EmptyKey(name.as_ref().to_string()));
            }
            let value = value.as_ref().trim();
            if value.is_empty() {
                return Err(EnvSetError::EmptyValue(name.as_ref().to_string()));
            }
            set.vars.insert(normalize_key(rest), value.to_string());
        }
        Ok(set)
    }

    /// Overlay `other` on top of `self`; keys present in both take `other`'s value.
    pub fn merge(mut self, other: EnvSet) -> Self {
        self.vars.extend(other.vars);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&normalize_key(key)).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Lower-case `key` and replace `.` with `_`
pub fn normalize_key(key: &str) -> String {
    key.trim().replace('.', "_").to_lowercase()
}
