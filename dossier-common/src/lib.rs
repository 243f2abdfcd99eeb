//! Common types and utilities shared across Dossier crates.
//!
//! This crate defines credentials, run options, the selector catalog,
//! observability helpers, and shared error types used throughout the
//! Dossier workspace. It is intentionally lightweight so that every
//! crate can depend on it without heavy transitive costs.
//!
//! # Overview
//!
//! - [`Credentials`]: login secrets, consumed once at session start
//! - [`RunOptions`]: what to extract (profile vs. group, nested posts/members)
//! - [`catalog`]: DOM selector catalog and localized vocabulary
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`DossierError`] and [`Result`]: shared error handling

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod catalog;
pub mod observability;

/// Login credentials. Input only; never serialized back out and never
/// held beyond the login step.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What a run extracts.
///
/// `group_id` selects the group pipeline; otherwise `person_id` selects a
/// single-profile run. `posts` and `members` gate the nested extractions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunOptions {
    #[serde(default)]
    pub person_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub posts: bool,
    #[serde(default)]
    pub members: bool,
}

impl RunOptions {
    /// Reject option combinations that cannot drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.person_id.is_none() && self.group_id.is_none() {
            return Err(DossierError::Config(
                "one of run.person_id or run.group_id must be set".into(),
            ));
        }
        if self.members && self.group_id.is_none() {
            return Err(DossierError::Config(
                "run.members requires run.group_id".into(),
            ));
        }
        Ok(())
    }
}

/// Error types used across the Dossier system.
#[derive(thiserror::Error, Debug)]
pub enum DossierError {
    /// Login form submission or the post-login navigation failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A page transition exceeded its configured bound.
    #[error("navigation to {url} timed out after {waited_ms}ms")]
    NavigationTimeout { url: String, waited_ms: u64 },

    /// The run-level cancellation token fired mid-run.
    #[error("run cancelled")]
    Cancelled,

    /// The browser transport reported an error.
    #[error("driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Configuration was incomplete or contradictory.
    #[error("configuration error: {0}")]
    Config(String),

    /// The final aggregate could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The final aggregate could not be written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient alias for results that use [`DossierError`].
pub type Result<T> = std::result::Result<T, DossierError>;
