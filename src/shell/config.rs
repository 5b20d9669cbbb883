// Runtime configuration read from the environment (and a .env file when present).
//
// EVENT_SOURCING_BIND_ADDR        listen address, default 0.0.0.0:8080
// EVENT_SOURCING_STORAGE          memory | file, default memory
// EVENT_SOURCING_STORAGE_DIR      stream directory for file storage, default ./data/streams
// EVENT_SOURCING_CONFLICT_POLICY  assume-conflict | assume-no-conflict, default assume-conflict

use crate::shared::infrastructure::conflict_detector::{ConflictPolicy, UnknownConflictPolicy};
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const BIND_ADDR: &str = "EVENT_SOURCING_BIND_ADDR";
pub const STORAGE: &str = "EVENT_SOURCING_STORAGE";
pub const STORAGE_DIR: &str = "EVENT_SOURCING_STORAGE_DIR";
pub const CONFLICT_POLICY: &str = "EVENT_SOURCING_CONFLICT_POLICY";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STORAGE_DIR: &str = "./data/streams";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a socket address: {value}")]
    InvalidBindAddr { name: &'static str, value: String },

    #[error("{name} must be 'memory' or 'file', got '{value}'")]
    InvalidStorage { name: &'static str, value: String },

    #[error("EVENT_SOURCING_CONFLICT_POLICY: {0}")]
    InvalidConflictPolicy(#[from] UnknownConflictPolicy),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub storage: Storage,
    pub conflict_policy: ConflictPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup(BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr {
                name: BIND_ADDR,
                value: raw_addr.clone(),
            })?;

        let storage = match lookup(STORAGE).as_deref().map(str::trim) {
            None | Some("") | Some("memory") => Storage::Memory,
            Some("file") => Storage::File(PathBuf::from(
                lookup(STORAGE_DIR).unwrap_or_else(|| DEFAULT_STORAGE_DIR.to_string()),
            )),
            Some(other) => {
                return Err(ConfigError::InvalidStorage {
                    name: STORAGE,
                    value: other.to_string(),
                });
            }
        };

        let conflict_policy = match lookup(CONFLICT_POLICY) {
            Some(raw) => raw.parse()?,
            None => ConflictPolicy::default(),
        };

        Ok(Self {
            bind_addr,
            storage,
            conflict_policy,
        })
    }
}
