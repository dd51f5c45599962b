//! Run-length motion codec and streaming readers for MAPF solution paths.
//!
//! A submission stores each agent's trajectory as a compact run-length
//! record such as `"3r2dw"`. This crate turns those records into per-timestep
//! actions without ever expanding a whole trajectory in memory.
//!
//! # Architecture
//!
//! - [`motion`]: symbol alphabet, lazy run and action decoding, timespans
//! - [`Chunk`]: bounded lookahead of decoded runs a reader buffers at a time
//! - [`Reader`]: forward-only per-agent stream answering "which action is
//!   active at timestep `t`"
//! - [`Seeker`]: one reader per agent, advanced in lock-step so every agent
//!   is evaluated at the same instant
//!
//! # Format
//!
//! ```text
//! record := run*
//! run    := [0-9]* symbol        (absent count = 1)
//! symbol := 'u' | 'd' | 'l' | 'r' | 'w'
//! ```
//!
//! Symbols outside the alphabet decode as zero-displacement actions so a
//! single malformed record never aborts a batch.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod chunk;
pub mod error;
pub mod motion;
pub mod reader;
pub mod seeker;

pub use chunk::{Chunk, Fill, Span};
pub use error::SeekError;
pub use motion::{
    decode, decode_from, encode, runs, runs_from, timespan, unknown_symbols, Action, Run, Runs,
};
pub use reader::{Peek, Reader, ReaderCheckpoint};
pub use seeker::{Seeker, SeekerCheckpoint, Step};

/// Default number of runs a [`Reader`] buffers per [`Chunk`].
pub const DEFAULT_CHUNK_CAPACITY: usize = 64;
