use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{Result, StayError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Server settings, read from the environment (and `.env` via dotenvy)
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub hash_cost: u32,
    pub log_dir: PathBuf,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 11111)),
            data_dir: PathBuf::from("staylink_data"),
            jwt_secret: "staylink_demo_secret".to_string(), // override in any shared deployment
            token_ttl_secs: 3600,
            hash_cost: bcrypt::DEFAULT_COST,
            log_dir: PathBuf::from("logs"),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(addr) = lookup("STAYLINK_ADDR") {
            config.addr = addr
                .parse()
                .map_err(|e| StayError::Config(format!("STAYLINK_ADDR '{addr}': {e}")))?;
        }
        if let Some(dir) = lookup("STAYLINK_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(secret) = lookup("STAYLINK_JWT_SECRET") {
            if secret.is_empty() {
                return Err(StayError::Config("STAYLINK_JWT_SECRET is empty".to_string()));
            }
            config.jwt_secret = secret;
        }
        if let Some(ttl) = lookup("STAYLINK_TOKEN_TTL_SECS") {
            config.token_ttl_secs = ttl
                .parse()
                .map_err(|e| StayError::Config(format!("STAYLINK_TOKEN_TTL_SECS '{ttl}': {e}")))?;
        }
        if let Some(cost) = lookup("STAYLINK_HASH_COST") {
            config.hash_cost = cost
                .parse()
                .map_err(|e| StayError::Config(format!("STAYLINK_HASH_COST '{cost}': {e}")))?;
        }
        if let Some(dir) = lookup("STAYLINK_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(format) = lookup("STAYLINK_LOG_FORMAT") {
            config.log_format = match format.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" | "text" => LogFormat::Pretty,
                other => {
                    return Err(StayError::Config(format!(
                        "STAYLINK_LOG_FORMAT '{other}' (expected json or pretty)"
                    )))
                }
            };
        }
        Ok(config)
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr.port(), 11111);
        assert_eq!(config.token_ttl_secs, 3600);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("STAYLINK_ADDR", "127.0.0.1:8080"),
            ("STAYLINK_TOKEN_TTL_SECS", "60"),
            ("STAYLINK_LOG_FORMAT", "JSON"),
            ("STAYLINK_HASH_COST", "4"),
        ]))
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.token_ttl_secs, 60);
        assert_eq!(config.hash_cost, 4);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_values_are_config_errors() {
        let err = Config::from_lookup(lookup(&[("STAYLINK_ADDR", "nowhere")])).unwrap_err();
        assert!(matches!(err, StayError::Config(_)));
        let err = Config::from_lookup(lookup(&[("STAYLINK_LOG_FORMAT", "xml")])).unwrap_err();
        assert!(err.to_string().contains("xml"));
    }
}
