//! Forward-only per-agent action stream.
//!
//! [`Reader`] answers "which action is active at timestep `t`" for one
//! agent's record. It decodes lazily, one [`Chunk`] of runs at a time, and
//! only ever moves forward: decode cost is amortised O(timespan) over a whole
//! validation run no matter how often timesteps are queried.

use tracing::trace;

use crate::chunk::Chunk;
use crate::error::SeekError;
use crate::motion::{timespan, Action};

/// Result of [`Reader::peek_at`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Peek {
    /// The record has an action at the requested timestep.
    Active(Action),
    /// The record is exhausted; the agent waits in place from now on.
    Done,
}

impl Peek {
    /// The action to apply: [`Peek::Done`] resolves to [`Action::Wait`].
    pub fn action(self) -> Action {
        match self {
            Peek::Active(action) => action,
            Peek::Done => Action::Wait,
        }
    }

    /// Whether the record is exhausted.
    pub fn is_done(self) -> bool {
        matches!(self, Peek::Done)
    }
}

/// Saved reader position, restored with [`Reader::restore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReaderCheckpoint {
    origin: usize,
    start: u64,
    last: Option<u64>,
}

/// Streams the actions of one agent's motion record.
///
/// # Examples
///
/// ```
/// use mapf_codec::{Action, Peek, Reader};
///
/// let mut reader = Reader::new("2rd", 16);
/// assert_eq!(reader.timespan(), 3);
/// assert_eq!(reader.peek_at(1).unwrap(), Peek::Active(Action::Right));
/// assert_eq!(reader.peek_at(2).unwrap(), Peek::Active(Action::Down));
/// assert_eq!(reader.peek_at(9).unwrap(), Peek::Done);
/// assert!(reader.peek_at(0).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    record: &'a str,
    timespan: u64,
    /// Byte offset of the first run not yet decoded.
    cursor: usize,
    /// Timestep at which the run at `cursor` begins.
    cursor_timestep: u64,
    exhausted: bool,
    chunk: Chunk,
    last: Option<u64>,
}

impl<'a> Reader<'a> {
    /// Create a reader over `record`, buffering up to `chunk_capacity` runs.
    pub fn new(record: &'a str, chunk_capacity: usize) -> Self {
        Self {
            record,
            timespan: timespan(record),
            cursor: 0,
            cursor_timestep: 0,
            exhausted: false,
            chunk: Chunk::with_capacity(chunk_capacity),
            last: None,
        }
    }

    /// Total number of timesteps the record describes.
    pub fn timespan(&self) -> u64 {
        self.timespan
    }

    /// The latest timestep requested so far.
    pub fn last_requested(&self) -> Option<u64> {
        self.last
    }

    /// The record being read.
    pub fn record(&self) -> &'a str {
        self.record
    }

    /// The action active at timestep `t`.
    ///
    /// Returns [`Peek::Done`] once `t >= timespan`. Requesting the same
    /// timestep again is allowed; requesting an earlier one fails with
    /// [`SeekError::LowerOutOfRange`] and leaves the reader untouched.
    pub fn peek_at(&mut self, t: u64) -> Result<Peek, SeekError> {
        if let Some(last) = self.last {
            if t < last {
                return Err(SeekError::LowerOutOfRange { requested: t, last });
            }
        }
        self.last = Some(t);
        if t >= self.timespan {
            return Ok(Peek::Done);
        }

        loop {
            if let Some(action) = self.chunk.lookup(t) {
                return Ok(Peek::Active(action));
            }
            if self.exhausted {
                return Ok(Peek::Done);
            }
            let fill = self
                .chunk
                .fill(self.record, self.cursor, self.cursor_timestep, t);
            trace!(
                offset = self.cursor,
                runs = self.chunk.len(),
                start = self.chunk.start(),
                end = self.chunk.end(),
                "reader refilled chunk"
            );
            self.cursor = fill.offset;
            self.cursor_timestep = fill.timestep;
            self.exhausted = fill.exhausted;
        }
    }

    /// Like [`peek_at`](Self::peek_at) but resolves [`Peek::Done`] to a wait.
    pub fn action_at(&mut self, t: u64) -> Result<Action, SeekError> {
        self.peek_at(t).map(Peek::action)
    }

    /// Capture the current position.
    ///
    /// The checkpoint records the run boundary at the start of the buffered
    /// chunk, so restoring re-decodes at most one chunk.
    pub fn checkpoint(&self) -> ReaderCheckpoint {
        let (origin, start) = if self.chunk.is_empty() {
            (self.cursor, self.cursor_timestep)
        } else {
            (self.chunk.origin(), self.chunk.start())
        };
        ReaderCheckpoint {
            origin,
            start,
            last: self.last,
        }
    }

    /// Rewind to a checkpoint taken from this reader.
    ///
    /// This is the only way to serve a timestep earlier than the last one
    /// requested.
    pub fn restore(&mut self, checkpoint: ReaderCheckpoint) {
        self.cursor = checkpoint.origin;
        self.cursor_timestep = checkpoint.start;
        self.exhausted = false;
        self.chunk.reset(checkpoint.origin, checkpoint.start);
        self.last = checkpoint.last;
    }
}
