//! # Configuration
//!
//! A flat string key/value store in the `app.set()` / `app.get()` style.
//! Keys are dotted (`admin.allowed_uid`, `assets.max_bytes`). Services read
//! from an immutable [`DeskConfigSnapshot`] taken once at wiring time.
//!
//! Environment variables can be layered on top with [`DeskConfig::load_env`]:
//!
//! ```rust
//! use desk_core::DeskConfig;
//!
//! let mut config = DeskConfig::new();
//! config.set("assets.max_bytes", "1048576");
//! // SHOPDESK__ADMIN__ALLOWED_UID=abc → admin.allowed_uid = "abc"
//! config.load_env("SHOPDESK__");
//! assert_eq!(config.get("assets.max_bytes"), Some("1048576"));
//! ```

use std::collections::HashMap;

use crate::errors::DeskError;

#[derive(Debug, Default, Clone)]
pub struct DeskConfig {
    values: HashMap<String, String>,
}

impl DeskConfig {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Copy every `PREFIX...` environment variable into the store.
    ///
    /// The prefix is stripped, the rest lowercased, and `__` becomes `.`.
    pub fn load_env(&mut self, prefix: &str) {
        self.load_vars(prefix, std::env::vars());
    }

    pub fn load_vars<I>(&mut self, prefix: &str, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(prefix) {
                let normalized = stripped.to_lowercase().replace("__", ".");
                if !normalized.is_empty() {
                    self.set(normalized, value);
                }
            }
        }
    }

    pub fn snapshot(&self) -> DeskConfigSnapshot {
        DeskConfigSnapshot::new(self.values.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeskConfigSnapshot {
    map: HashMap<String, String>,
}

impl DeskConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.trim().parse::<u64>().ok())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.trim().parse::<bool>().ok())
    }

    /// Comma-separated list, blanks dropped.
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
    }

    /// Like `get_string`, but a missing or blank value is a `BadRequest`.
    pub fn require(&self, key: &str) -> anyhow::Result<String> {
        match self.get(key).map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err(DeskError::bad_request(format!("missing configuration value: {key}"))
                .into_anyhow()),
        }
    }
}
