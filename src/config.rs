//! Runtime configuration.
//!
//! Configuration is a static key-value document, one entry per line:
//!
//! ```text
//! # local backend
//! API_BASE_URL = http://localhost:5001
//! MONGO_URI=mongodb://localhost:27017
//! config.MONGO_DATABASE = "WhatTheGovDoin";
//! ```
//!
//! Keys may carry a `config.` prefix and lines may end in `;`, so legacy
//! `env.js` files parse as data. The document is never executed.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use thiserror::Error;

use crate::network::{DEFAULT_API_URL, DEFAULT_DATABASE};

pub const KEY_API_BASE_URL: &str = "API_BASE_URL";
pub const KEY_MONGO_URI: &str = "MONGO_URI";
pub const KEY_MONGO_USERNAME: &str = "MONGO_INITDB_ROOT_USERNAME";
pub const KEY_MONGO_PASSWORD: &str = "MONGO_INITDB_ROOT_PASSWORD";
pub const KEY_MONGO_DATABASE: &str = "MONGO_DATABASE";

const KNOWN_KEYS: [&str; 5] = [
    KEY_API_BASE_URL,
    KEY_MONGO_URI,
    KEY_MONGO_USERNAME,
    KEY_MONGO_PASSWORD,
    KEY_MONGO_DATABASE,
];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config line {line}: {content}")]
    Malformed { line: usize, content: String },

    #[error("Missing config key: {0}")]
    MissingKey(&'static str),
}

/// Settings shared by the query client and the schema bootstrap.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Base origin for base-relative endpoints.
    pub api_base_url: String,
    pub mongo_uri: Option<String>,
    pub mongo_username: Option<String>,
    pub mongo_password: Option<String>,
    pub mongo_database: String,
    /// Keys this crate does not interpret, kept verbatim.
    pub extra: BTreeMap<String, String>,
    /// Known keys assigned through [`set`](Self::set), default or not.
    explicit: BTreeSet<&'static str>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            mongo_uri: None,
            mongo_username: None,
            mongo_password: None,
            mongo_database: DEFAULT_DATABASE.to_string(),
            extra: BTreeMap::new(),
            explicit: BTreeSet::new(),
        }
    }
}

impl RuntimeConfig {
    /// Parse a key-value document. Later entries override earlier ones.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                continue;
            }
            let (key, value) = split_entry(line).ok_or_else(|| ConfigError::Malformed {
                line: idx + 1,
                content: line.to_string(),
            })?;
            config.set(key, value);
        }
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Read the known keys from the process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        for key in KNOWN_KEYS {
            if let Ok(value) = std::env::var(key) {
                config.set(key, &value);
            }
        }
        config
    }

    /// Overlay every key `other` set explicitly, even when it equals the default.
    pub fn merge(mut self, other: RuntimeConfig) -> Self {
        for key in &other.explicit {
            if let Some(value) = other.get(key) {
                self.set(key, &value);
            }
        }
        self.extra.extend(other.extra);
        self
    }

    /// Apply command-line flags on top of everything else.
    pub fn apply_overrides(mut self, mongo_uri: Option<&str>, database: Option<&str>) -> Self {
        if let Some(uri) = mongo_uri {
            self.set(KEY_MONGO_URI, uri);
        }
        if let Some(database) = database {
            self.set(KEY_MONGO_DATABASE, database);
        }
        self
    }

    /// Whether `key` was assigned explicitly rather than left at its default.
    pub fn is_set(&self, key: &str) -> bool {
        self.explicit.contains(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        match key {
            KEY_API_BASE_URL => Some(self.api_base_url.clone()),
            KEY_MONGO_URI => self.mongo_uri.clone(),
            KEY_MONGO_USERNAME => self.mongo_username.clone(),
            KEY_MONGO_PASSWORD => self.mongo_password.clone(),
            KEY_MONGO_DATABASE => Some(self.mongo_database.clone()),
            _ => self.extra.get(key).cloned(),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(known) = KNOWN_KEYS.iter().find(|k| **k == key) {
            self.explicit.insert(*known);
        }
        match key {
            KEY_API_BASE_URL => self.api_base_url = value.to_string(),
            KEY_MONGO_URI => self.mongo_uri = Some(value.to_string()),
            KEY_MONGO_USERNAME => self.mongo_username = Some(value.to_string()),
            KEY_MONGO_PASSWORD => self.mongo_password = Some(value.to_string()),
            KEY_MONGO_DATABASE => self.mongo_database = value.to_string(),
            _ => {
                self.extra.insert(key.to_string(), value.to_string());
            }
        }
    }

    pub fn require_mongo_uri(&self) -> Result<&str, ConfigError> {
        self.mongo_uri
            .as_deref()
            .ok_or(ConfigError::MissingKey(KEY_MONGO_URI))
    }
}

/// Split `KEY = VALUE` / `KEY: VALUE`, stripping `config.`, `;` and quotes.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let line = line.strip_suffix(';').unwrap_or(line).trim_end();
    let sep = line.find(|c: char| c == '=' || c == ':')?;
    let key = line[..sep].trim();
    let key = key.strip_prefix("config.").unwrap_or(key);
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key, unquote(line[sep + 1..].trim())))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
