//! Validator configuration, validation, and error types.
//!
//! [`ValidatorConfig`] selects the rules a [`Validator`](crate::Validator)
//! enforces and how it reacts to the first violation. It can be built in code
//! or read from a TOML file; [`validate()`](ValidatorConfig::validate) checks
//! structural invariants before any batch is processed.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use mapf_checks::{Check, FinalCheck};
use mapf_codec::DEFAULT_CHUNK_CAPACITY;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── FailurePolicy ──────────────────────────────────────────────────

/// What the default error handler does on a violation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep stepping and collect every violation. Default.
    #[default]
    Comprehensive,
    /// Stop at the first timestep with a violation and skip final checks.
    FailFast,
}

// ── ValidatorConfig ────────────────────────────────────────────────

/// Rule selection and resource limits for a validator.
///
/// # Examples
///
/// ```
/// use mapf_engine::{FailurePolicy, ValidatorConfig};
///
/// let config = ValidatorConfig::from_toml_str(
///     r#"
///     checks = ["immediate_collision", "edge_collision"]
///     policy = "fail_fast"
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.policy, FailurePolicy::FailFast);
/// assert_eq!(config.chunk_capacity, 64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Rules evaluated at every timestep, in order.
    pub checks: Vec<Check>,
    /// Rules evaluated once against terminal positions.
    pub final_checks: Vec<FinalCheck>,
    /// Reaction to violations when no explicit handler is given.
    pub policy: FailurePolicy,
    /// Runs buffered per agent reader. Default: 64.
    pub chunk_capacity: usize,
    /// Reject batches whose longest record exceeds this many timesteps.
    /// `None` = unlimited.
    ///
    /// Validation time grows with the timespan, not the record length: a
    /// few bytes such as `18446744073709551615w` describe `u64::MAX` steps.
    /// Set a limit whenever records come from untrusted submitters.
    pub max_timespan: Option<u64>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            checks: Check::DEFAULT.to_vec(),
            final_checks: FinalCheck::DEFAULT.to_vec(),
            policy: FailurePolicy::Comprehensive,
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            max_timespan: None,
        }
    }
}

impl ValidatorConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_capacity == 0 {
            return Err(ConfigError::ZeroChunkCapacity);
        }
        if self.checks.is_empty() && self.final_checks.is_empty() {
            return Err(ConfigError::NoChecks);
        }
        let mut seen = HashSet::new();
        for check in &self.checks {
            if !seen.insert(check.name()) {
                return Err(ConfigError::DuplicateCheck {
                    name: check.name(),
                });
            }
        }
        for check in &self.final_checks {
            if !seen.insert(check.name()) {
                return Err(ConfigError::DuplicateCheck {
                    name: check.name(),
                });
            }
        }
        if self.max_timespan == Some(0) {
            return Err(ConfigError::ZeroTimespanLimit);
        }
        Ok(())
    }

    /// Whether any selected final check reads goal points.
    pub fn needs_goals(&self) -> bool {
        self.final_checks.iter().any(|c| c.needs_goals())
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while loading or validating a [`ValidatorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `chunk_capacity` is zero.
    #[error("chunk_capacity must be at least 1")]
    ZeroChunkCapacity,
    /// Neither per-step nor final checks were selected.
    #[error("no checks selected")]
    NoChecks,
    /// A rule was listed twice.
    #[error("check '{name}' is listed more than once")]
    DuplicateCheck {
        /// The repeated rule.
        name: &'static str,
    },
    /// `max_timespan` is zero, which would reject every non-empty batch.
    #[error("max_timespan must be at least 1 when set")]
    ZeroTimespanLimit,
    /// The TOML document is malformed or names an unknown key or rule.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
