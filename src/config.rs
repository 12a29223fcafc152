//! Server configuration from environment variables
//!
//! | variable | default |
//! |---|---|
//! | `MINIKOM_BIND` | `0.0.0.0:8080` |
//! | `MINIKOM_DATA_DIR` | unset (in-memory store) |
//! | `MINIKOM_SYNC_WRITES` | `true` |
//! | `MINIKOM_ORDERING` | `latest` |
//! | `MINIKOM_LOG_FORMAT` | `pretty` |

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::monitor::OrderingPolicy;
use crate::observability::LogFormat;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Invalid configuration value
#[derive(Debug, thiserror::Error)]
#[error("invalid value '{value}' for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Runtime configuration of the server
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    /// Directory for the durable logs; `None` keeps state in memory
    pub data_dir: Option<PathBuf>,
    pub sync_writes: bool,
    pub ordering: OrderingPolicy,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            data_dir: None,
            sync_writes: true,
            ordering: OrderingPolicy::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(value) = get("MINIKOM_BIND") {
            config.bind = value
                .trim()
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError {
                    key: "MINIKOM_BIND",
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
        }

        if let Some(value) = get("MINIKOM_DATA_DIR") {
            let path = Path::new(value.trim());
            config.data_dir = Some(if path.is_absolute() {
                path.to_path_buf()
            } else {
                env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(path)
            });
        }

        if let Some(value) = get("MINIKOM_SYNC_WRITES") {
            config.sync_writes = parse_bool(&value).ok_or_else(|| ConfigError {
                key: "MINIKOM_SYNC_WRITES",
                value: value.clone(),
                reason: "expected true or false".to_string(),
            })?;
        }

        if let Some(value) = get("MINIKOM_ORDERING") {
            config.ordering = value.parse::<OrderingPolicy>().map_err(|reason| ConfigError {
                key: "MINIKOM_ORDERING",
                value: value.clone(),
                reason,
            })?;
        }

        if let Some(value) = get("MINIKOM_LOG_FORMAT") {
            config.log_format = value.parse::<LogFormat>().map_err(|reason| ConfigError {
                key: "MINIKOM_LOG_FORMAT",
                value: value.clone(),
                reason,
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
        assert!(config.data_dir.is_none());
        assert!(config.sync_writes);
        assert_eq!(config.ordering, OrderingPolicy::Latest);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("MINIKOM_BIND", "127.0.0.1:9000"),
            ("MINIKOM_DATA_DIR", "/var/lib/minikom"),
            ("MINIKOM_SYNC_WRITES", "off"),
            ("MINIKOM_ORDERING", "nearest_preceding"),
            ("MINIKOM_LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/minikom")));
        assert!(!config.sync_writes);
        assert_eq!(config.ordering, OrderingPolicy::NearestPreceding);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_relative_data_dir_is_resolved() {
        let config = Config::from_lookup(lookup(&[("MINIKOM_DATA_DIR", "data")])).unwrap();
        let data_dir = config.data_dir.unwrap();
        assert!(data_dir.is_absolute());
        assert!(data_dir.ends_with("data"));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = Config::from_lookup(lookup(&[("MINIKOM_BIND", "not-an-addr")])).unwrap_err();
        assert_eq!(err.key, "MINIKOM_BIND");

        let err = Config::from_lookup(lookup(&[("MINIKOM_SYNC_WRITES", "maybe")])).unwrap_err();
        assert_eq!(err.key, "MINIKOM_SYNC_WRITES");

        let err = Config::from_lookup(lookup(&[("MINIKOM_ORDERING", "random")])).unwrap_err();
        assert!(err.to_string().contains("MINIKOM_ORDERING"));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[("MINIKOM_BIND", "  ")])).unwrap();
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
    }
}
