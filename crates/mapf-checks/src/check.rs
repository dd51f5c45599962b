//! Closed sets of selectable rules.
//!
//! [`Check`] and [`FinalCheck`] name the rules a validator enforces. They are
//! plain enums rather than trait objects: the rule set is fixed, so
//! selection can be read from configuration files and command lines by name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::{CheckParameters, CheckResult, FinalCheckParameters};
use crate::rules;

/// A rule name that matches no [`Check`] or [`FinalCheck`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown check '{name}'")]
pub struct UnknownCheckError {
    /// The name that failed to parse.
    pub name: String,
}

/// A rule evaluated at every timestep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// Two agents on the same cell.
    ImmediateCollision,
    /// An agent off the grid.
    DomainOutOfBounds,
    /// An agent on an obstacle.
    DomainCollision,
    /// Two agents swapping cells.
    EdgeCollision,
    /// A record symbol outside the alphabet.
    UnknownAction,
}

impl Check {
    /// The rules a benchmark submission is held to.
    pub const DEFAULT: [Check; 4] = [
        Check::ImmediateCollision,
        Check::DomainOutOfBounds,
        Check::DomainCollision,
        Check::EdgeCollision,
    ];

    /// Every per-step rule.
    pub const ALL: [Check; 5] = [
        Check::ImmediateCollision,
        Check::DomainOutOfBounds,
        Check::DomainCollision,
        Check::EdgeCollision,
        Check::UnknownAction,
    ];

    /// Configuration name of the rule.
    pub fn name(self) -> &'static str {
        match self {
            Check::ImmediateCollision => "immediate_collision",
            Check::DomainOutOfBounds => "domain_out_of_bounds",
            Check::DomainCollision => "domain_collision",
            Check::EdgeCollision => "edge_collision",
            Check::UnknownAction => "unknown_action",
        }
    }

    /// Run the rule over one timestep.
    pub fn evaluate(self, params: &CheckParameters<'_>) -> CheckResult {
        match self {
            Check::ImmediateCollision => rules::check_immediate_collision(params),
            Check::DomainOutOfBounds => rules::check_domain_out_of_bounds(params),
            Check::DomainCollision => rules::check_domain_collision(params),
            Check::EdgeCollision => rules::check_edge_collision(params),
            Check::UnknownAction => rules::check_unknown_action(params),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Check {
    type Err = UnknownCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Check::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| UnknownCheckError { name: s.to_string() })
    }
}

/// A rule evaluated once against terminal positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalCheck {
    /// Every agent ends on its goal.
    GoalReached,
}

impl FinalCheck {
    /// The final rules a benchmark submission is held to.
    pub const DEFAULT: [FinalCheck; 1] = [FinalCheck::GoalReached];

    /// Configuration name of the rule.
    pub fn name(self) -> &'static str {
        match self {
            FinalCheck::GoalReached => "goal_reached",
        }
    }

    /// Whether the rule reads goal points.
    pub fn needs_goals(self) -> bool {
        matches!(self, FinalCheck::GoalReached)
    }

    /// Run the rule over terminal positions.
    pub fn evaluate(self, params: &FinalCheckParameters<'_>) -> CheckResult {
        match self {
            FinalCheck::GoalReached => rules::check_goal_reached(params),
        }
    }
}

impl fmt::Display for FinalCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FinalCheck {
    type Err = UnknownCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('-', "_").as_str() {
            "goal_reached" => Ok(FinalCheck::GoalReached),
            _ => Err(UnknownCheckError { name: s.to_string() }),
        }
    }
}
