//! Stable exit codes for `mapf-validate`.

use mapf_engine::Outcome;

/// Every checked path is valid, or there was nothing to check.
pub const VALID: i32 = 0;
/// At least one rule was violated.
pub const INVALID: i32 = 1;
/// Inputs could not be read or validated.
pub const ERROR: i32 = 2;

/// Exit code for a verdict.
pub fn for_outcome(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Valid | Outcome::Skipped | Outcome::Outdated => VALID,
        Outcome::Invalid => INVALID,
        Outcome::Error => ERROR,
    }
}
