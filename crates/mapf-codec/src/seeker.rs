//! Lock-step advancement of every agent's reader.
//!
//! [`Seeker`] owns one [`Reader`] per agent plus each agent's current
//! position. [`advance_all`](Seeker::advance_all) is the single
//! synchronisation point: all agents are moved to the same timestep before
//! the caller sees any position, even though their records have independent
//! lengths and decode cursors.

use mapf_core::Point;

use crate::error::SeekError;
use crate::motion::Action;
use crate::reader::{Reader, ReaderCheckpoint};

/// Positions before and after one timestep, borrowed from the [`Seeker`].
#[derive(Clone, Copy, Debug)]
pub struct Step<'s> {
    /// The timestep whose actions were applied.
    pub timestep: u64,
    /// Positions at the start of the timestep.
    pub prev: &'s [Point],
    /// Positions after the actions were applied.
    pub next: &'s [Point],
    /// The action each agent took ([`Action::Wait`] once its record ended).
    pub actions: &'s [Action],
}

/// Saved seeker state, restored with [`Seeker::restore`].
#[derive(Clone, Debug)]
pub struct SeekerCheckpoint {
    readers: Vec<ReaderCheckpoint>,
    positions: Vec<Point>,
    next_timestep: u64,
}

/// Advances one [`Reader`] per agent in lock-step.
///
/// # Examples
///
/// ```
/// use mapf_codec::Seeker;
/// use mapf_core::Point;
///
/// let sources = [Point::new(0, 0), Point::new(3, 3)];
/// let records = ["2d", ""];
/// let mut seeker = Seeker::new(&sources, &records, 16).unwrap();
/// assert_eq!(seeker.timespan(), 2);
///
/// let step = seeker.advance_all(0).unwrap();
/// assert_eq!(step.next, &[Point::new(0, 1), Point::new(3, 3)]);
/// ```
#[derive(Clone, Debug)]
pub struct Seeker<'a> {
    readers: Vec<Reader<'a>>,
    positions: Vec<Point>,
    prev: Vec<Point>,
    actions: Vec<Action>,
    next_timestep: u64,
    timespan: u64,
}

impl<'a> Seeker<'a> {
    /// Create a seeker with agents seeded at `sources`.
    ///
    /// Fails with [`SeekError::AgentCountMismatch`] when the slices differ in
    /// length.
    pub fn new<S>(
        sources: &[Point],
        records: &'a [S],
        chunk_capacity: usize,
    ) -> Result<Self, SeekError>
    where
        S: AsRef<str>,
    {
        if sources.len() != records.len() {
            return Err(SeekError::AgentCountMismatch {
                sources: sources.len(),
                records: records.len(),
            });
        }
        let readers: Vec<Reader<'a>> = records
            .iter()
            .map(|r| Reader::new(r.as_ref(), chunk_capacity))
            .collect();
        let timespan = readers.iter().map(Reader::timespan).max().unwrap_or(0);
        Ok(Self {
            readers,
            positions: sources.to_vec(),
            prev: sources.to_vec(),
            actions: vec![Action::Wait; sources.len()],
            next_timestep: 0,
            timespan,
        })
    }

    /// Number of agents.
    pub fn agent_count(&self) -> usize {
        self.readers.len()
    }

    /// Longest timespan over all agents.
    pub fn timespan(&self) -> u64 {
        self.timespan
    }

    /// Per-agent timespans.
    pub fn timespans(&self) -> impl Iterator<Item = u64> + '_ {
        self.readers.iter().map(Reader::timespan)
    }

    /// The earliest timestep [`advance_all`](Self::advance_all) accepts.
    pub fn next_timestep(&self) -> u64 {
        self.next_timestep
    }

    /// Current position of every agent.
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Apply every agent's action at `t` and return the resulting [`Step`].
    ///
    /// Timesteps between [`next_timestep`](Self::next_timestep) and `t` are
    /// applied first, so positions stay exact when the caller skips ahead.
    /// A `t` that was already applied fails with
    /// [`SeekError::LowerOutOfRange`]; applying a move twice would corrupt
    /// positions.
    pub fn advance_all(&mut self, t: u64) -> Result<Step<'_>, SeekError> {
        if t < self.next_timestep {
            return Err(SeekError::LowerOutOfRange {
                requested: t,
                last: self.next_timestep - 1,
            });
        }
        while self.next_timestep < t {
            let skipped = self.next_timestep;
            self.apply(skipped)?;
        }
        self.prev.copy_from_slice(&self.positions);
        self.apply(t)?;
        Ok(Step {
            timestep: t,
            prev: &self.prev,
            next: &self.positions,
            actions: &self.actions,
        })
    }

    fn apply(&mut self, t: u64) -> Result<(), SeekError> {
        for ((reader, pos), action) in self
            .readers
            .iter_mut()
            .zip(self.positions.iter_mut())
            .zip(self.actions.iter_mut())
        {
            *action = reader.action_at(t)?;
            *pos = action.apply(*pos);
        }
        self.next_timestep = t.saturating_add(1);
        Ok(())
    }

    /// Capture positions and reader cursors.
    pub fn checkpoint(&self) -> SeekerCheckpoint {
        SeekerCheckpoint {
            readers: self.readers.iter().map(Reader::checkpoint).collect(),
            positions: self.positions.clone(),
            next_timestep: self.next_timestep,
        }
    }

    /// Rewind to a checkpoint taken from this seeker.
    pub fn restore(&mut self, checkpoint: &SeekerCheckpoint) -> Result<(), SeekError> {
        if checkpoint.readers.len() != self.readers.len() {
            return Err(SeekError::StaleCheckpoint {
                checkpoint: checkpoint.readers.len(),
                seeker: self.readers.len(),
            });
        }
        for (reader, cp) in self.readers.iter_mut().zip(&checkpoint.readers) {
            reader.restore(*cp);
        }
        self.positions.copy_from_slice(&checkpoint.positions);
        self.prev.copy_from_slice(&checkpoint.positions);
        self.actions.fill(Action::Wait);
        self.next_timestep = checkpoint.next_timestep;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapf_test_utils::{p, walk};

    #[test]
    fn mismatched_lengths_rejected() {
        let err = Seeker::new(&[p(0, 0)], &["r", "l"], 4).unwrap_err();
        assert_eq!(
            err,
            SeekError::AgentCountMismatch {
                sources: 1,
                records: 2
            }
        );
    }

    #[test]
    fn short_records_freeze_at_last_position() {
        let mut s = Seeker::new(&[p(0, 0), p(5, 5)], &["r", "4u"], 4).unwrap();
        assert_eq!(s.timespan(), 4);
        for t in 0..4 {
            s.advance_all(t).unwrap();
        }
        assert_eq!(s.positions(), &[p(1, 0), p(5, 1)]);
        let step = s.advance_all(4).unwrap();
        assert_eq!(step.prev, step.next);
        assert_eq!(step.actions, &[Action::Wait, Action::Wait]);
    }

    #[test]
    fn repeated_timestep_is_rejected() {
        let mut s = Seeker::new(&[p(0, 0)], &["3r"], 4).unwrap();
        s.advance_all(0).unwrap();
        s.advance_all(1).unwrap();
        assert_eq!(
            s.advance_all(1).unwrap_err(),
            SeekError::LowerOutOfRange {
                requested: 1,
                last: 1
            }
        );
        assert_eq!(s.positions(), &[p(2, 0)]);
    }

    #[test]
    fn skipping_ahead_applies_intermediate_moves() {
        let mut s = Seeker::new(&[p(0, 0)], &["2r2d"], 1).unwrap();
        let step = s.advance_all(3).unwrap();
        assert_eq!(step.timestep, 3);
        assert_eq!(step.prev, &[p(2, 1)]);
        assert_eq!(step.next, &[p(2, 2)]);
        assert_eq!(s.next_timestep(), 4);
    }

    #[test]
    fn positions_match_reference_walk() {
        let sources = [p(0, 0), p(4, 4), p(2, 7)];
        let records = ["3r2d10w", "u2l", "x3dr"];
        let mut s = Seeker::new(&sources, &records, 2).unwrap();
        let traces: Vec<Vec<_>> = sources
            .iter()
            .zip(records)
            .map(|(src, rec)| walk(*src, rec))
            .collect();
        for t in 0..s.timespan() {
            let step = s.advance_all(t).unwrap();
            for (agent, trace) in traces.iter().enumerate() {
                let at = |i: u64| trace[(i as usize).min(trace.len() - 1)];
                assert_eq!(step.prev[agent], at(t));
                assert_eq!(step.next[agent], at(t + 1));
            }
        }
    }

    #[test]
    fn checkpoint_restore_replays_identically() {
        let sources = [p(0, 0), p(9, 9)];
        let records = ["5r3d", "2l2u4w"];
        let mut s = Seeker::new(&sources, &records, 1).unwrap();
        s.advance_all(0).unwrap();
        s.advance_all(1).unwrap();
        let cp = s.checkpoint();

        let first: Vec<Vec<_>> = (2..8)
            .map(|t| s.advance_all(t).unwrap().next.to_vec())
            .collect();
        s.restore(&cp).unwrap();
        assert_eq!(s.next_timestep(), 2);
        let second: Vec<Vec<_>> = (2..8)
            .map(|t| s.advance_all(t).unwrap().next.to_vec())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn foreign_checkpoint_is_rejected() {
        let mut one = Seeker::new(&[p(0, 0)], &["r"], 4).unwrap();
        let two = Seeker::new(&[p(0, 0), p(1, 1)], &["r", "l"], 4).unwrap();
        assert!(matches!(
            one.restore(&two.checkpoint()),
            Err(SeekError::StaleCheckpoint { .. })
        ));
    }
}
