//! Configuration lock for reload detection.
//!
//! The lock records a hash of the rendered configuration. A caller compares a
//! fresh render against it to decide whether the daemon needs a reload.

use crate::error::Result;
use crate::model::DirectiveTree;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use xxhash_rust::xxh64::xxh64;

/// Seed for xxhash to ensure deterministic hashing.
const HASH_SEED: u64 = 0x4C4F_4752_4F55; // "LOGROU" in hex

/// A configuration lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigLock {
    /// Version of the lock format.
    pub version: u32,
    /// Logging system name.
    pub system: String,
    /// Hash of the rendered configuration.
    pub config_hash: String,
    /// Number of directives in the tree.
    pub directive_count: usize,
    /// Timestamp when the lock was created (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ConfigLock {
    /// Creates a lock from a tree and its rendered configuration.
    #[must_use]
    pub fn new(tree: &DirectiveTree, rendered: &str) -> Self {
        Self {
            version: 1,
            system: tree.system.clone(),
            config_hash: config_hash(rendered),
            directive_count: tree.directives.len(),
            created_at: None,
        }
    }

    /// Stamps the lock with the current time.
    #[must_use]
    pub fn with_timestamp(mut self) -> Self {
        self.created_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        self
    }

    /// Returns `true` if `rendered` hashes to the locked value.
    #[must_use]
    pub fn verify(&self, rendered: &str) -> bool {
        self.config_hash == config_hash(rendered)
    }

    /// Loads a lock from a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Saves the lock to a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }

    /// Serializes the lock to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a lock from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Computes the deterministic hash of a rendered configuration.
#[must_use]
pub fn config_hash(rendered: &str) -> String {
    let hash = xxh64(rendered.as_bytes(), HASH_SEED);
    format!("{hash:016x}")
}
