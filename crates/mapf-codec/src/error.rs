//! Error types for the streaming engine.

use thiserror::Error;

/// Contract violations raised by [`Reader`](crate::Reader) and
/// [`Seeker`](crate::Seeker).
///
/// None of these describe bad submission data: malformed records decode as
/// waits and exhausted records report [`Peek::Done`](crate::Peek::Done).
/// An error here means the caller drove the stream incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeekError {
    /// A timestep earlier than one already consumed was requested.
    #[error("timestep {requested} requested after timestep {last} was already consumed")]
    LowerOutOfRange {
        /// The timestep that was asked for.
        requested: u64,
        /// The latest timestep already served.
        last: u64,
    },
    /// The number of source points and records differ.
    #[error("{sources} source points supplied for {records} motion records")]
    AgentCountMismatch {
        /// Number of source points.
        sources: usize,
        /// Number of records.
        records: usize,
    },
    /// A checkpoint was restored into a seeker with a different agent count.
    #[error("checkpoint covers {checkpoint} agents, seeker has {seeker}")]
    StaleCheckpoint {
        /// Agent count recorded in the checkpoint.
        checkpoint: usize,
        /// Agent count of the seeker.
        seeker: usize,
    },
}
