//! Validation verdicts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The verdict for a batch or a stored submission entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Every selected rule passed.
    Valid,
    /// At least one rule reported a violation.
    Invalid,
    /// Nothing was validated: every entry was already checked, or the run
    /// was stopped before reaching a verdict.
    Skipped,
    /// The batch could not be validated.
    Error,
    /// The entry was superseded by a newer entry for the same agent.
    Outdated,
}

impl Outcome {
    /// Lowercase name, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Valid => "valid",
            Outcome::Invalid => "invalid",
            Outcome::Skipped => "skipped",
            Outcome::Error => "error",
            Outcome::Outdated => "outdated",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict plus every violation collected for one batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// The verdict.
    pub outcome: Outcome,
    /// Violation messages in the order they were found.
    pub errors: Vec<String>,
    /// Agents implicated by each message, index-aligned with `errors`.
    pub error_agents: Vec<Vec<usize>>,
    /// Timesteps stepped through.
    pub timesteps: u64,
    /// Whether stepping stopped before the last timestep.
    pub aborted: bool,
}

impl ValidationReport {
    /// A report for a batch that could not be validated.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Error,
            errors: vec![message.into()],
            error_agents: vec![Vec::new()],
            timesteps: 0,
            aborted: false,
        }
    }

    /// Whether the verdict is [`Outcome::Valid`].
    pub fn is_valid(&self) -> bool {
        self.outcome == Outcome::Valid
    }

    /// Number of leading agents untouched by any violation.
    ///
    /// Each violation implicates up to two agents; the violation is blamed
    /// on the higher-indexed one, and the prefix ends at the lowest blamed
    /// agent. Agents `0..prefix` may therefore form a valid solution on
    /// their own. `None` when there are no attributed violations.
    ///
    /// ```
    /// use mapf_engine::{Outcome, ValidationReport};
    ///
    /// let report = ValidationReport {
    ///     outcome: Outcome::Invalid,
    ///     errors: vec!["a".into(), "b".into()],
    ///     error_agents: vec![vec![3, 7], vec![5]],
    ///     timesteps: 4,
    ///     aborted: false,
    /// };
    /// assert_eq!(report.valid_prefix(), Some(5));
    /// ```
    pub fn valid_prefix(&self) -> Option<usize> {
        self.error_agents
            .iter()
            .filter_map(|agents| agents.iter().copied().max())
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_lowercase() {
        let json = serde_json::to_string(&Outcome::Outdated).unwrap();
        assert_eq!(json, "\"outdated\"");
        let back: Outcome = serde_json::from_str("\"invalid\"").unwrap();
        assert_eq!(back, Outcome::Invalid);
    }

    #[test]
    fn error_report_carries_message() {
        let report = ValidationReport::error("no domain supplied");
        assert_eq!(report.outcome, Outcome::Error);
        assert_eq!(report.errors, vec!["no domain supplied".to_string()]);
        assert_eq!(report.valid_prefix(), None);
    }

    #[test]
    fn valid_prefix_ignores_unattributed_errors() {
        let report = ValidationReport {
            outcome: Outcome::Invalid,
            errors: vec!["x".into(), "y".into()],
            error_agents: vec![vec![], vec![0, 1]],
            timesteps: 1,
            aborted: false,
        };
        assert_eq!(report.valid_prefix(), Some(1));
    }
}
