/*!
 * Copyright 2025 Supactl Contributors
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Postgres connection settings

use crate::error::GenError;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Everything but RFC 3986 unreserved characters, so `%` is always encoded
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub const DEFAULT_LOCAL_DB_PORT: u16 = 54322;
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_USER: &str = "postgres";
const DEFAULT_DATABASE: &str = "postgres";

/// Connection settings for a Postgres database
///
/// An empty `host` means no database was selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DbConfig {
    /// Settings of the local development database
    pub fn local(port: u16) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port,
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_USER.to_string(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }

    /// Parse a `postgres://` or `postgresql://` connection URL.
    ///
    /// A URL without a host yields a config with an empty host.
    pub fn from_url(db_url: &str) -> Result<Self, GenError> {
        if db_url.trim().is_empty() {
            return Ok(Self::default());
        }
        let url = Url::parse(db_url).map_err(|e| GenError::InvalidDbUrl(e.to_string()))?;
        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(GenError::InvalidDbUrl(format!(
                "unsupported scheme '{}', expected postgresql://",
                url.scheme()
            )));
        }

        let user = match url.username() {
            "" => DEFAULT_USER.to_string(),
            name => decode(name),
        };
        let database = url
            .path()
            .trim_start_matches('/')
            .split('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(decode)
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        Ok(Self {
            host: url.host_str().unwrap_or_default().to_string(),
            port: url.port().unwrap_or(DEFAULT_PORT),
            user,
            password: url.password().map(decode).unwrap_or_default(),
            database,
        })
    }

    /// Render as a `postgresql://` URL with credentials percent-encoded
    pub fn to_url(&self) -> Result<String, GenError> {
        let mut url = Url::parse("postgresql://localhost")
            .map_err(|e| GenError::InvalidDbUrl(e.to_string()))?;
        let invalid = |what: &str| GenError::InvalidDbUrl(format!("invalid {what}"));
        url.set_host(Some(&self.host)).map_err(|_| invalid("host"))?;
        url.set_port(Some(self.port)).map_err(|_| invalid("port"))?;
        url.set_username(&encode(&self.user))
            .map_err(|_| invalid("user"))?;
        if !self.password.is_empty() {
            url.set_password(Some(&encode(&self.password)))
                .map_err(|_| invalid("password"))?;
        }
        url.set_path(&encode(&self.database));
        Ok(url.to_string())
    }
}

// `url` leaves `%`, `&` and `+` untouched in userinfo and path
fn encode(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}
