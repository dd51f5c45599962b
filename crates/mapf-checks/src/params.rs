//! Check inputs and results.

use mapf_codec::{Action, Step};
use mapf_core::{Domain, Point};
use smallvec::SmallVec;

/// Agent indices implicated in one violation (usually one or two).
pub type AgentList = SmallVec<[usize; 2]>;

/// Read-only snapshot handed to per-step checks.
///
/// `timestep` is the step whose actions moved agents from `prev` to `next`;
/// agents arrive at `next` at `timestep + 1`, which is the instant error
/// messages report.
#[derive(Clone, Copy, Debug)]
pub struct CheckParameters<'a> {
    /// Positions before the step.
    pub prev: &'a [Point],
    /// Positions after the step.
    pub next: &'a [Point],
    /// The action each agent applied.
    pub actions: &'a [Action],
    /// The map.
    pub domain: &'a Domain,
    /// Original source points.
    pub sources: &'a [Point],
    /// Index of the step being checked.
    pub timestep: u64,
    /// Declared goals, for checks that need them.
    pub goals: Option<&'a [Point]>,
}

impl<'a> CheckParameters<'a> {
    /// Snapshot a seeker [`Step`].
    pub fn from_step(
        step: &Step<'a>,
        domain: &'a Domain,
        sources: &'a [Point],
        goals: Option<&'a [Point]>,
    ) -> Self {
        Self {
            prev: step.prev,
            next: step.next,
            actions: step.actions,
            domain,
            sources,
            timestep: step.timestep,
            goals,
        }
    }

    /// The instant agents arrive at `next`.
    pub fn arrival(&self) -> u64 {
        self.timestep.saturating_add(1)
    }
}

/// Read-only snapshot handed to final checks.
#[derive(Clone, Copy, Debug)]
pub struct FinalCheckParameters<'a> {
    /// Terminal positions.
    pub current: &'a [Point],
    /// The map.
    pub domain: &'a Domain,
    /// Original source points.
    pub sources: &'a [Point],
    /// The terminal timestep (the batch timespan).
    pub timestep: u64,
    /// Declared goals.
    pub goals: Option<&'a [Point]>,
}

/// Violations reported by one check.
///
/// `errors[i]` is a human-readable message and `error_agents[i]` the agents
/// it implicates. Empty on success.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckResult {
    /// Violation messages.
    pub errors: Vec<String>,
    /// Agents implicated by each message, index-aligned with `errors`.
    pub error_agents: Vec<AgentList>,
}

impl CheckResult {
    /// A result with no violations.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Whether no violations were found.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the result holds no violations.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a violation.
    pub fn push(&mut self, message: String, agents: &[usize]) {
        self.errors.push(message);
        self.error_agents.push(agents.iter().copied().collect());
    }

    /// Iterate `(message, agents)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> + '_ {
        self.errors
            .iter()
            .map(String::as_str)
            .zip(self.error_agents.iter().map(|a| a.as_slice()))
    }

    /// Every implicated agent, sorted and deduplicated.
    pub fn agents(&self) -> Vec<usize> {
        let mut all: Vec<usize> = self.error_agents.iter().flatten().copied().collect();
        all.sort_unstable();
        all.dedup();
        all
    }
}
