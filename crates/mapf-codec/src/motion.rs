//! Motion symbols and lazy run-length decoding.
//!
//! Decoding is total: every symbol maps to exactly one [`Action`], counts
//! saturate instead of overflowing, and a trailing count with no symbol is
//! ignored. Iterators borrow the record and can start at any run boundary,
//! which is what lets a [`Reader`](crate::Reader) resume decoding from the
//! byte offset where its previous [`Chunk`](crate::Chunk) stopped.

use std::fmt;

use mapf_core::Point;

// ── Action ──────────────────────────────────────────────────────

/// A single-timestep move.
///
/// `y` grows downwards, so [`Action::Up`] decrements `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// `u`: one cell towards `y - 1`.
    Up,
    /// `d`: one cell towards `y + 1`.
    Down,
    /// `l`: one cell towards `x - 1`.
    Left,
    /// `r`: one cell towards `x + 1`.
    Right,
    /// `w`: stay in place.
    Wait,
    /// A symbol outside the alphabet. Decodes as a wait.
    Unknown(char),
}

impl Action {
    /// Map a record symbol to its action.
    pub fn from_symbol(c: char) -> Self {
        match c {
            'u' => Action::Up,
            'd' => Action::Down,
            'l' => Action::Left,
            'r' => Action::Right,
            'w' => Action::Wait,
            other => Action::Unknown(other),
        }
    }

    /// The record symbol for this action.
    pub fn symbol(self) -> char {
        match self {
            Action::Up => 'u',
            Action::Down => 'd',
            Action::Left => 'l',
            Action::Right => 'r',
            Action::Wait => 'w',
            Action::Unknown(c) => c,
        }
    }

    /// Returns the `(dx, dy)` displacement.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::Up => (0, -1),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
            Action::Wait | Action::Unknown(_) => (0, 0),
        }
    }

    /// Position reached by taking this action from `p`.
    pub fn apply(self, p: Point) -> Point {
        let (dx, dy) = self.delta();
        p.offset(dx, dy)
    }

    /// Whether the symbol belongs to the alphabet.
    pub fn is_known(self) -> bool {
        !matches!(self, Action::Unknown(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ── Runs ────────────────────────────────────────────────────────

/// One `<count><symbol>` pair of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    /// The repeated action.
    pub action: Action,
    /// Repeat count (1 when the record omits it, may be 0).
    pub count: u64,
    /// Byte offset where the run starts (first digit or the symbol).
    pub offset: usize,
    /// Byte offset one past the symbol: the start of the next run.
    pub end: usize,
}

/// Lazy iterator over the runs of a record.
#[derive(Clone, Debug)]
pub struct Runs<'a> {
    record: &'a str,
    pos: usize,
}

impl Runs<'_> {
    /// Byte offset of the next run to be decoded.
    pub fn offset(&self) -> usize {
        self.pos
    }
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let start = self.pos;
        let mut count: Option<u64> = None;
        let mut chars = self.record[self.pos..].chars();
        for c in chars.by_ref() {
            self.pos += c.len_utf8();
            if let Some(digit) = c.to_digit(10) {
                let acc = count.unwrap_or(0);
                count = Some(acc.saturating_mul(10).saturating_add(u64::from(digit)));
                continue;
            }
            return Some(Run {
                action: Action::from_symbol(c),
                count: count.unwrap_or(1),
                offset: start,
                end: self.pos,
            });
        }
        None
    }
}

/// Iterate the runs of `record` from the start.
pub fn runs(record: &str) -> Runs<'_> {
    runs_from(record, 0)
}

/// Iterate the runs of `record` starting at byte `offset`.
///
/// `offset` must be a run boundary (`0` or some [`Run::end`]). An offset past
/// the end of the record, or one that splits a character, yields nothing.
pub fn runs_from(record: &str, offset: usize) -> Runs<'_> {
    let pos = if record.is_char_boundary(offset) {
        offset
    } else {
        record.len()
    };
    Runs { record, pos }
}

// ── Actions ─────────────────────────────────────────────────────

/// Lazy iterator over the per-timestep actions of a record.
#[derive(Clone, Debug)]
pub struct Actions<'a> {
    runs: Runs<'a>,
    current: Option<(Action, u64)>,
}

impl Iterator for Actions<'_> {
    type Item = Action;

    fn next(&mut self) -> Option<Action> {
        loop {
            if let Some((action, remaining)) = self.current.as_mut() {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Some(*action);
                }
            }
            let run = self.runs.next()?;
            self.current = Some((run.action, run.count));
        }
    }
}

/// Decode `record` into its action sequence, lazily.
///
/// # Examples
///
/// ```
/// use mapf_codec::{decode, Action};
///
/// let actions: Vec<Action> = decode("2rd").collect();
/// assert_eq!(actions, vec![Action::Right, Action::Right, Action::Down]);
/// ```
pub fn decode(record: &str) -> Actions<'_> {
    decode_from(record, 0)
}

/// Decode `record` from the run boundary at byte `offset`.
pub fn decode_from(record: &str, offset: usize) -> Actions<'_> {
    Actions {
        runs: runs_from(record, offset),
        current: None,
    }
}

/// Total decoded length of `record`: the agent's timespan.
///
/// Sums run counts without expanding them.
pub fn timespan(record: &str) -> u64 {
    runs(record).fold(0u64, |acc, run| acc.saturating_add(run.count))
}

/// Byte offsets of symbols outside the alphabet.
pub fn unknown_symbols(record: &str) -> Vec<usize> {
    runs(record)
        .filter(|run| !run.action.is_known())
        .map(|run| run.end - run.action.symbol().len_utf8())
        .collect()
}

/// Encode an action sequence in compact run-length form.
///
/// Runs of length one are written without a count.
pub fn encode<I>(actions: I) -> String
where
    I: IntoIterator<Item = Action>,
{
    let mut out = String::new();
    let mut current: Option<(Action, u64)> = None;
    let flush = |out: &mut String, run: Option<(Action, u64)>| {
        if let Some((action, count)) = run {
            if count > 1 {
                out.push_str(&count.to_string());
            }
            out.push(action.symbol());
        }
    };
    for action in actions {
        if let Some((a, n)) = current.as_mut() {
            if *a == action {
                *n += 1;
                continue;
            }
        }
        flush(&mut out, current.replace((action, 1)));
    }
    flush(&mut out, current);
    out
}
