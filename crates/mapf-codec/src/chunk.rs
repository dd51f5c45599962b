//! Bounded lookahead buffer of decoded runs.
//!
//! A [`Chunk`] holds at most `capacity` decoded runs as [`Span`]s: half-open
//! timestep intervals paired with the action active over them. Memory per
//! reader is therefore bounded by the capacity, not by the record length,
//! however long the trajectory.

use crate::motion::{runs_from, Action};

/// A decoded run placed on the timeline: `action` is active for every
/// timestep in `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// First timestep of the run.
    pub start: u64,
    /// One past the last timestep of the run.
    pub end: u64,
    /// The action repeated across the span.
    pub action: Action,
}

/// Where a [`Chunk::fill`] stopped decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fill {
    /// Byte offset of the first run not buffered: the resume point.
    pub offset: usize,
    /// Timestep at which the run at `offset` begins.
    pub timestep: u64,
    /// Whether the record has no runs left after `offset`.
    pub exhausted: bool,
}

/// A window of decoded runs covering the timesteps `[start, end)`.
#[derive(Clone, Debug)]
pub struct Chunk {
    spans: Vec<Span>,
    capacity: usize,
    origin: usize,
    start: u64,
    end: u64,
    hint: usize,
}

impl Chunk {
    /// Create an empty chunk buffering up to `capacity` runs (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            spans: Vec::with_capacity(capacity),
            capacity,
            origin: 0,
            start: 0,
            end: 0,
            hint: 0,
        }
    }

    /// Maximum number of runs held at once.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of runs currently held.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether no runs are held.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Byte offset of the first buffered run; always a run boundary.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// First timestep covered.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// One past the last timestep covered.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Whether `t` falls inside `[start, end)`.
    pub fn covers(&self, t: u64) -> bool {
        self.start <= t && t < self.end
    }

    /// Drop all runs and anchor the empty window at `origin` / `start`.
    pub fn reset(&mut self, origin: usize, start: u64) {
        self.spans.clear();
        self.origin = origin;
        self.start = start;
        self.end = start;
        self.hint = 0;
    }

    /// The action active at `t`, or `None` when `t` is outside the window.
    ///
    /// Scans forward from the previous hit, so monotonically increasing
    /// queries cost O(1) amortised; an earlier query falls back to a binary
    /// search.
    pub fn lookup(&mut self, t: u64) -> Option<Action> {
        if !self.covers(t) {
            return None;
        }
        if self.spans[self.hint].start > t {
            self.hint = self.spans.partition_point(|s| s.end <= t);
        }
        while self.spans[self.hint].end <= t {
            self.hint += 1;
        }
        Some(self.spans[self.hint].action)
    }

    /// Replace the window with runs decoded from `record` at byte `offset`,
    /// where the run at `offset` begins at timestep `timestep`.
    ///
    /// Runs that end at or before `skip_to` are decoded but not buffered, so
    /// a reader jumping far ahead does not churn through full windows it will
    /// never query. Zero-length runs are never buffered. Decoding stops once
    /// `capacity` runs are held or the record ends.
    pub fn fill(&mut self, record: &str, offset: usize, timestep: u64, skip_to: u64) -> Fill {
        let mut runs = runs_from(record, offset);
        let mut t = timestep;
        let mut resume = offset;
        let mut origin = offset;
        self.spans.clear();
        self.hint = 0;

        while self.spans.len() < self.capacity {
            let Some(run) = runs.next() else {
                break;
            };
            let end = t.saturating_add(run.count);
            if run.count > 0 && end > skip_to {
                if self.spans.is_empty() {
                    origin = run.offset;
                }
                self.spans.push(Span {
                    start: t,
                    end,
                    action: run.action,
                });
            }
            t = end;
            resume = run.end;
        }

        self.origin = if self.spans.is_empty() { resume } else { origin };
        self.start = self.spans.first().map_or(t, |s| s.start);
        self.end = t;
        Fill {
            offset: resume,
            timestep: t,
            exhausted: runs_from(record, resume).next().is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_respects_capacity() {
        let mut chunk = Chunk::with_capacity(2);
        let fill = chunk.fill("2ru3dw", 0, 0, 0);
        assert_eq!(chunk.len(), 2);
        assert_eq!((chunk.start(), chunk.end()), (0, 3));
        assert_eq!(
            fill,
            Fill {
                offset: 3,
                timestep: 3,
                exhausted: false
            }
        );

        let fill = chunk.fill("2ru3dw", fill.offset, fill.timestep, 0);
        assert_eq!((chunk.start(), chunk.end()), (3, 7));
        assert_eq!(chunk.origin(), 3);
        assert!(fill.exhausted);
    }

    #[test]
    fn lookup_walks_spans() {
        let mut chunk = Chunk::with_capacity(8);
        chunk.fill("2ru3d", 0, 0, 0);
        assert_eq!(chunk.lookup(0), Some(Action::Right));
        assert_eq!(chunk.lookup(1), Some(Action::Right));
        assert_eq!(chunk.lookup(2), Some(Action::Up));
        assert_eq!(chunk.lookup(5), Some(Action::Down));
        assert_eq!(chunk.lookup(6), None);
        // Backwards lookups inside the window still resolve.
        assert_eq!(chunk.lookup(1), Some(Action::Right));
    }

    #[test]
    fn skip_to_drops_runs_before_target() {
        let mut chunk = Chunk::with_capacity(1);
        let fill = chunk.fill("3r4u2l", 0, 0, 5);
        assert_eq!(chunk.len(), 1);
        assert_eq!((chunk.start(), chunk.end()), (3, 7));
        assert_eq!(chunk.origin(), 2);
        assert_eq!(chunk.lookup(5), Some(Action::Up));
        assert_eq!(fill.offset, 4);
    }

    #[test]
    fn zero_runs_are_not_buffered() {
        let mut chunk = Chunk::with_capacity(4);
        chunk.fill("0r0u", 0, 0, 0);
        assert!(chunk.is_empty());
        assert_eq!((chunk.start(), chunk.end()), (0, 0));
        assert_eq!(chunk.origin(), 4);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        assert_eq!(Chunk::with_capacity(0).capacity(), 1);
    }
}
