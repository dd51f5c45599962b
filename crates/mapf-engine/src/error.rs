//! Errors that stop a validation before it can produce a verdict.

use mapf_codec::SeekError;
use thiserror::Error;

use crate::config::ConfigError;

/// A batch that cannot be validated as given.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// No map was supplied.
    #[error("no domain supplied")]
    MissingDomain,
    /// A goal-reading final check is selected but no goals were supplied.
    #[error("goal check selected but no goals supplied")]
    MissingGoals,
    /// A per-agent input does not have one entry per path.
    #[error("expected {expected} {what}, got {actual}")]
    AgentCountMismatch {
        /// Which input is short or long (`"sources"` or `"goals"`).
        what: &'static str,
        /// Number of paths in the batch.
        expected: usize,
        /// Number of entries supplied.
        actual: usize,
    },
    /// A record describes more timesteps than the configured limit.
    #[error("agent {agent} path spans {timespan} timesteps, limit is {limit}")]
    TimespanTooLong {
        /// The offending agent.
        agent: usize,
        /// Its record's timespan.
        timespan: u64,
        /// The configured `max_timespan`.
        limit: u64,
    },
}

/// Failure of a validation run.
///
/// Rule violations are not errors: they are reported in the
/// [`ValidationReport`](crate::ValidationReport). This type covers inputs
/// that cannot be validated and internal invariant breaks.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The batch fails a precondition.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    /// The seeker was driven out of order.
    #[error(transparent)]
    Seek(#[from] SeekError),
}
