//! Shared configuration store with JSON persistence.
//!
//! # Responsibilities
//! - Load the persisted config at startup, falling back to defaults
//! - Guard the live config behind a reader/writer lock
//! - Apply form-driven updates under the write lock
//! - Persist after every mutation (best-effort; never fatal)
//!
//! # Design Decisions
//! - A read or parse failure at load time degrades to a zero-valued config
//!   plus the defaulting pass; the process never refuses to start over a
//!   corrupt file
//! - The defaulted config is persisted unconditionally at load time, so
//!   storage always mirrors memory, first run and corrupt-file run included
//! - Persist failures are logged at warn level and swallowed; the in-memory
//!   state stays authoritative for the life of the process

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tokio::sync::RwLock;

use crate::config::schema::{Config, CredentialEntry};

/// Error writing the config file. Callers log these; they are never
/// surfaced to the dashboard.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A form-driven configuration update.
///
/// Numeric fields arrive as raw strings: a value that fails to parse falls
/// back to the previous value rather than erroring (the dashboard always
/// responds ok to a save). Credential rows are parsed by the HTTP layer
/// before this type is built; the store never sees indexed form keys.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub web_port: String,
    pub node_port: String,
    pub source_url: String,
    pub prefix_filter: String,
    pub credentials: Vec<CredentialEntry>,
}

/// Lock-guarded owner of the live [`Config`].
pub struct ConfigStore {
    path: PathBuf,
    inner: RwLock<Config>,
}

impl ConfigStore {
    /// Load the config from `path`, apply defaults, and persist the result.
    ///
    /// Never fails: unreadable or unparsable storage degrades to the
    /// all-default config.
    pub fn load_or_default(path: PathBuf) -> Self {
        let mut config = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(config) => config,
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "Config file unparsable, starting from defaults");
                    Config::default()
                }
            },
            Err(error) => {
                if error.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), %error, "Config file unreadable, starting from defaults");
                }
                Config::default()
            }
        };

        config.apply_defaults();

        // Synchronize storage with memory even on first run.
        if let Err(error) = persist(&path, &config) {
            tracing::warn!(path = %path.display(), %error, "Failed to persist config");
        }

        Self {
            path,
            inner: RwLock::new(config),
        }
    }

    /// Read-locked deep copy of the live config.
    ///
    /// The clone owns its credential list and header map, so callers can
    /// hold it as long as they like without touching the lock again.
    pub async fn snapshot(&self) -> Config {
        self.inner.read().await.clone()
    }

    /// Apply a dashboard update under the write lock and persist before
    /// releasing it.
    ///
    /// A completed call is visible to every snapshot taken afterwards.
    pub async fn apply_update(&self, update: ConfigUpdate) {
        let mut config = self.inner.write().await;

        config.web_port = parse_or_keep(&update.web_port, config.web_port);
        config.node_template.node_port =
            parse_or_keep(&update.node_port, config.node_template.node_port);
        config.source_url = update.source_url;
        config.prefix_filter = update.prefix_filter;
        config.credentials = if update.credentials.is_empty() {
            vec![CredentialEntry::default()]
        } else {
            update.credentials
        };

        if let Err(error) = persist(&self.path, &config) {
            tracing::warn!(path = %self.path.display(), %error, "Failed to persist config");
        }
    }
}

/// Parse `raw` as `T`, keeping `previous` when it does not parse.
fn parse_or_keep<T: FromStr>(raw: &str, previous: T) -> T {
    raw.trim().parse().unwrap_or(previous)
}

fn persist(path: &Path, config: &Config) -> Result<(), PersistError> {
    let bytes = serde_json::to_vec_pretty(config)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
