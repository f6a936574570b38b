//! Construction data for storage backends.

use depot_error::ConfigError;
use std::collections::BTreeMap;

/// Data part of a `type:data` location string, parsed for the backend type.
///
/// Backends with simple data receive the string verbatim (typically a path).
/// All others receive comma-separated `key=value` pairs, e.g.
/// `host=files.example.org,token=secret`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendData {
    /// Plain string, passed through unchanged
    Simple(String),
    /// Parsed `key=value` pairs
    Pairs(BTreeMap<String, String>),
}

impl BackendData {
    /// Parse `data` as simple or key/value data.
    ///
    /// # Errors
    ///
    /// Returns an error if key/value data is malformed.
    pub fn parse(data: &str, simple: bool) -> Result<Self, ConfigError> {
        if simple {
            Ok(BackendData::Simple(data.to_string()))
        } else {
            Self::parse_pairs(data).map(BackendData::Pairs)
        }
    }

    /// Parse comma-separated `key=value` pairs.
    ///
    /// Keys and values are trimmed and values may contain `=`. An empty string
    /// yields no pairs and empty items (such as a trailing comma) are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error for an item without `=`, an empty key, or a key given twice.
    ///
    /// # Example
    ///
    /// ```
    /// use depot_storage::BackendData;
    ///
    /// let pairs = BackendData::parse_pairs("host=foo, token = a=b").unwrap();
    /// assert_eq!(pairs["host"], "foo");
    /// assert_eq!(pairs["token"], "a=b");
    /// ```
    pub fn parse_pairs(data: &str) -> Result<BTreeMap<String, String>, ConfigError> {
        let mut pairs = BTreeMap::new();

        for item in data.split(',') {
            if item.trim().is_empty() {
                continue;
            }
            let Some((key, value)) = item.split_once('=') else {
                return Err(ConfigError::new(format!(
                    "Invalid backend data item '{}': expected key=value",
                    item.trim()
                )));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::new(format!(
                    "Invalid backend data item '{}': empty key",
                    item.trim()
                )));
            }
            if pairs.insert(key.to_string(), value.trim().to_string()).is_some() {
                return Err(ConfigError::new(format!(
                    "Duplicate backend data key '{}'",
                    key
                )));
            }
        }

        Ok(pairs)
    }

    /// The plain string, for simple data.
    pub fn as_simple(&self) -> Option<&str> {
        match self {
            BackendData::Simple(data) => Some(data),
            BackendData::Pairs(_) => None,
        }
    }

    /// Value of `key`, for key/value data.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            BackendData::Pairs(pairs) => pairs.get(key).map(String::as_str),
            BackendData::Simple(_) => None,
        }
    }

    /// Value of a mandatory `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is absent or the data is simple.
    pub fn require(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::new(format!("Missing backend data key '{}'", key)))
    }
}
