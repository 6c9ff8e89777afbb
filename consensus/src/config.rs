//! Voting-power configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use votepower_types::Dec;
use votepower_utils::{try_init_logging, LogFormat};

use crate::error::VotePowerError;
use crate::policy::SharePolicy;

/// Configuration for roster computation.
///
/// Can be loaded from a TOML file via [`VotePowerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VotePowerConfig {
    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The `[policy]` section; validated into a [`SharePolicy`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Share split equally between internal slots.
    #[serde(default = "default_internal_share")]
    pub internal_share: Dec,

    /// Share split between external slots in proportion to stake.
    #[serde(default = "default_external_share")]
    pub external_share: Dec,
}

/// The `[logging]` section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// "human" or "json".
    #[serde(default)]
    pub format: LogFormat,

    /// Filter directive, e.g. "info" or "debug,votepower_consensus=trace".
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_internal_share() -> Dec {
    SharePolicy::reference().internal_share().clone()
}

fn default_external_share() -> Dec {
    SharePolicy::reference().external_share().clone()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl VotePowerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, VotePowerError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| VotePowerError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, VotePowerError> {
        toml::from_str(s).map_err(|e| VotePowerError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, VotePowerError> {
        toml::to_string_pretty(self).map_err(|e| VotePowerError::Config(e.to_string()))
    }

    /// The validated share policy.
    pub fn share_policy(&self) -> Result<SharePolicy, VotePowerError> {
        self.policy.to_share_policy()
    }
}

impl PolicyConfig {
    pub fn to_share_policy(&self) -> Result<SharePolicy, VotePowerError> {
        SharePolicy::new(self.internal_share.clone(), self.external_share.clone())
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            internal_share: default_internal_share(),
            external_share: default_external_share(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber described by this section.
    pub fn init(&self) -> Result<(), VotePowerError> {
        try_init_logging(self.format, &self.level)?;
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
        }
    }
}
