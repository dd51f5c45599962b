//! The validation state machine.
//!
//! A [`Validation`] moves through four phases:
//!
//! ```text
//! Initializing -> Stepping -> Finalizing -> Done
//! ```
//!
//! Preconditions are checked when the validation is created by
//! [`Validator::start`]. Each call to [`Validation::step`] then performs one
//! unit of work: entering the stepping phase, checking one timestep, or
//! running the final checks. Callers that drive the loop themselves can stop
//! between any two calls; [`Validation::finish`] summarises whatever was
//! reached.

use mapf_checks::{AgentList, CheckParameters, CheckResult, FinalCheckParameters};
use mapf_codec::Seeker;
use mapf_core::{Domain, Point};
use tracing::{debug, trace};

use crate::config::{ConfigError, FailurePolicy, ValidatorConfig};
use crate::error::{PreconditionError, ValidateError};
use crate::outcome::{Outcome, ValidationReport};

// ── Callback protocol ──────────────────────────────────────────────

/// Returned by the error callback to continue or stop stepping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Keep validating.
    Continue,
    /// Stop stepping and skip the final checks.
    Abort,
}

/// One failing check, as seen by the error callback.
#[derive(Clone, Copy, Debug)]
pub struct Violation<'r> {
    /// The timestep whose actions were checked, or the batch timespan for
    /// final checks.
    pub timestep: u64,
    /// Configuration name of the failing rule.
    pub check: &'static str,
    /// Whether the rule is a final check.
    pub is_final: bool,
    /// Messages reported by the rule.
    pub errors: &'r [String],
    /// Agents implicated by each message.
    pub agents: &'r [AgentList],
}

/// Current phase of a [`Validation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Preconditions passed; stepping has not begun.
    Initializing,
    /// Timesteps remain to be checked.
    Stepping,
    /// Every timestep is checked; final checks remain.
    Finalizing,
    /// Nothing remains.
    Done,
}

// ── Input ──────────────────────────────────────────────────────────

/// One batch to validate: a map plus per-agent sources, goals and records.
///
/// `sources`, `goals` and `paths` are index-aligned: entry `i` of each
/// belongs to agent `i`.
#[derive(Debug)]
pub struct ValidationInput<'a, S = String> {
    /// The map. Validation fails its preconditions without one.
    pub domain: Option<&'a Domain>,
    /// Starting point of each agent.
    pub sources: &'a [Point],
    /// Declared goal of each agent, required by goal-reading final checks.
    pub goals: Option<&'a [Point]>,
    /// Encoded motion record of each agent.
    pub paths: &'a [S],
}

impl<'a, S: AsRef<str>> ValidationInput<'a, S> {
    /// A batch with every input present.
    pub fn new(
        domain: &'a Domain,
        sources: &'a [Point],
        goals: &'a [Point],
        paths: &'a [S],
    ) -> Self {
        Self {
            domain: Some(domain),
            sources,
            goals: Some(goals),
            paths,
        }
    }

    /// Number of agents in the batch.
    pub fn agent_count(&self) -> usize {
        self.paths.len()
    }
}

// ── Validator ──────────────────────────────────────────────────────

/// Reusable validation entry point.
///
/// Holds only the validated configuration, so one validator can check any
/// number of batches, concurrently if shared between threads.
#[derive(Clone, Debug, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator, rejecting an invalid configuration.
    pub fn new(config: ValidatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in force.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Check preconditions and set up a [`Validation`] in
    /// [`Phase::Initializing`].
    pub fn start<'a, S: AsRef<str>>(
        &self,
        input: &ValidationInput<'a, S>,
    ) -> Result<Validation<'_, 'a>, ValidateError> {
        let domain = input.domain.ok_or(PreconditionError::MissingDomain)?;
        let agents = input.paths.len();
        if input.sources.len() != agents {
            return Err(PreconditionError::AgentCountMismatch {
                what: "sources",
                expected: agents,
                actual: input.sources.len(),
            }
            .into());
        }
        match input.goals {
            None if self.config.needs_goals() => {
                return Err(PreconditionError::MissingGoals.into());
            }
            Some(goals) if goals.len() != agents => {
                return Err(PreconditionError::AgentCountMismatch {
                    what: "goals",
                    expected: agents,
                    actual: goals.len(),
                }
                .into());
            }
            _ => {}
        }

        let seeker = Seeker::new(input.sources, input.paths, self.config.chunk_capacity)?;
        if let Some(limit) = self.config.max_timespan {
            if let Some((agent, timespan)) =
                seeker.timespans().enumerate().find(|&(_, t)| t > limit)
            {
                return Err(PreconditionError::TimespanTooLong {
                    agent,
                    timespan,
                    limit,
                }
                .into());
            }
        }

        let timespan = seeker.timespan();
        debug!(
            agents,
            timespan,
            width = domain.width(),
            height = domain.height(),
            "validation started"
        );
        Ok(Validation {
            config: &self.config,
            seeker,
            domain,
            sources: input.sources,
            goals: input.goals,
            phase: Phase::Initializing,
            next: 0,
            timespan,
            collected: Collected::default(),
            aborted: false,
        })
    }

    /// Validate a batch to completion, calling `on_error` for each failing
    /// check.
    pub fn run<S, F>(
        &self,
        input: &ValidationInput<'_, S>,
        mut on_error: F,
    ) -> Result<ValidationReport, ValidateError>
    where
        S: AsRef<str>,
        F: FnMut(&Violation<'_>) -> Flow,
    {
        let mut validation = self.start(input)?;
        while validation.step(&mut on_error)? != Phase::Done {}
        Ok(validation.finish())
    }

    /// Validate a batch, stopping early only under
    /// [`FailurePolicy::FailFast`].
    pub fn validate<S: AsRef<str>>(
        &self,
        input: &ValidationInput<'_, S>,
    ) -> Result<ValidationReport, ValidateError> {
        let flow = match self.config.policy {
            FailurePolicy::Comprehensive => Flow::Continue,
            FailurePolicy::FailFast => Flow::Abort,
        };
        self.run(input, |_| flow)
    }
}

/// Validate one batch under `config`, calling `on_error` for each failing
/// check.
pub fn validate<S, F>(
    input: &ValidationInput<'_, S>,
    config: &ValidatorConfig,
    on_error: F,
) -> Result<ValidationReport, ValidateError>
where
    S: AsRef<str>,
    F: FnMut(&Violation<'_>) -> Flow,
{
    Validator::new(config.clone())?.run(input, on_error)
}

// ── Validation ─────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Collected {
    errors: Vec<String>,
    error_agents: Vec<Vec<usize>>,
}

impl Collected {
    /// Report a failing rule to the callback and keep its violations.
    fn record<F>(
        &mut self,
        on_error: &mut F,
        timestep: u64,
        check: &'static str,
        is_final: bool,
        result: CheckResult,
    ) -> Flow
    where
        F: FnMut(&Violation<'_>) -> Flow,
    {
        if result.is_ok() {
            return Flow::Continue;
        }
        trace!(timestep, check, count = result.len(), "check failed");
        let flow = on_error(&Violation {
            timestep,
            check,
            is_final,
            errors: &result.errors,
            agents: &result.error_agents,
        });
        self.errors.extend(result.errors);
        self.error_agents
            .extend(result.error_agents.into_iter().map(|a| a.into_vec()));
        flow
    }
}

/// One batch in progress. Created by [`Validator::start`].
#[derive(Debug)]
pub struct Validation<'v, 'a> {
    config: &'v ValidatorConfig,
    seeker: Seeker<'a>,
    domain: &'a Domain,
    sources: &'a [Point],
    goals: Option<&'a [Point]>,
    phase: Phase,
    next: u64,
    timespan: u64,
    collected: Collected,
    aborted: bool,
}

impl Validation<'_, '_> {
    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The next timestep to be checked.
    pub fn timestep(&self) -> u64 {
        self.next
    }

    /// Longest record timespan in the batch.
    pub fn timespan(&self) -> u64 {
        self.timespan
    }

    /// Current position of every agent.
    pub fn positions(&self) -> &[Point] {
        self.seeker.positions()
    }

    /// Violations collected so far.
    pub fn errors(&self) -> &[String] {
        &self.collected.errors
    }

    /// Perform one unit of work and return the phase reached.
    ///
    /// Calling `step` in [`Phase::Done`] does nothing.
    pub fn step<F>(&mut self, on_error: &mut F) -> Result<Phase, ValidateError>
    where
        F: FnMut(&Violation<'_>) -> Flow,
    {
        match self.phase {
            Phase::Initializing => {
                self.phase = self.after_timestep();
            }
            Phase::Stepping => {
                let t = self.next;
                let step = self.seeker.advance_all(t)?;
                let params =
                    CheckParameters::from_step(&step, self.domain, self.sources, self.goals);
                for check in &self.config.checks {
                    let flow = self.collected.record(
                        on_error,
                        t,
                        check.name(),
                        false,
                        check.evaluate(&params),
                    );
                    if flow == Flow::Abort {
                        debug!(timestep = t, check = check.name(), "validation aborted");
                        self.aborted = true;
                        self.next = t + 1;
                        self.phase = Phase::Done;
                        return Ok(self.phase);
                    }
                }
                self.next = t + 1;
                self.phase = self.after_timestep();
            }
            Phase::Finalizing => {
                let params = FinalCheckParameters {
                    current: self.seeker.positions(),
                    domain: self.domain,
                    sources: self.sources,
                    timestep: self.timespan,
                    goals: self.goals,
                };
                for check in &self.config.final_checks {
                    let flow = self.collected.record(
                        on_error,
                        self.timespan,
                        check.name(),
                        true,
                        check.evaluate(&params),
                    );
                    if flow == Flow::Abort {
                        break;
                    }
                }
                self.phase = Phase::Done;
            }
            Phase::Done => {}
        }
        Ok(self.phase)
    }

    fn after_timestep(&self) -> Phase {
        if self.next < self.timespan {
            Phase::Stepping
        } else {
            Phase::Finalizing
        }
    }

    /// Summarise the validation.
    ///
    /// A validation stopped before [`Phase::Done`] without any violation is
    /// reported as [`Outcome::Skipped`]: it proved nothing either way.
    pub fn finish(self) -> ValidationReport {
        let complete = self.phase == Phase::Done;
        let outcome = if !self.collected.errors.is_empty() {
            Outcome::Invalid
        } else if complete {
            Outcome::Valid
        } else {
            Outcome::Skipped
        };
        debug!(
            %outcome,
            errors = self.collected.errors.len(),
            timesteps = self.next,
            "validation finished"
        );
        ValidationReport {
            outcome,
            errors: self.collected.errors,
            error_agents: self.collected.error_agents,
            timesteps: self.next,
            aborted: self.aborted || !complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapf_checks::{Check, FinalCheck};
    use mapf_test_utils::{ascii_domain, open_domain, p};

    fn keep_going(_: &Violation<'_>) -> Flow {
        Flow::Continue
    }

    #[test]
    fn phases_progress_in_order() {
        let d = open_domain(4, 4);
        let sources = [p(0, 0)];
        let goals = [p(2, 0)];
        let paths = ["2r"];
        let input = ValidationInput::new(&d, &sources, &goals, &paths);
        let validator = Validator::default();
        let mut v = validator.start(&input).unwrap();
        assert_eq!(v.phase(), Phase::Initializing);

        let mut cb = keep_going;
        assert_eq!(v.step(&mut cb).unwrap(), Phase::Stepping);
        assert_eq!(v.step(&mut cb).unwrap(), Phase::Stepping);
        assert_eq!(v.positions(), &[p(1, 0)]);
        assert_eq!(v.step(&mut cb).unwrap(), Phase::Finalizing);
        assert_eq!(v.step(&mut cb).unwrap(), Phase::Done);
        assert_eq!(v.step(&mut cb).unwrap(), Phase::Done);

        let report = v.finish();
        assert_eq!(report.outcome, Outcome::Valid);
        assert_eq!(report.timesteps, 2);
        assert!(!report.aborted);
    }

    #[test]
    fn empty_batch_goes_straight_to_final_checks() {
        let d = open_domain(2, 2);
        let input: ValidationInput<'_, &str> = ValidationInput::new(&d, &[], &[], &[]);
        let validator = Validator::default();
        let mut v = validator.start(&input).unwrap();
        assert_eq!(v.step(&mut keep_going).unwrap(), Phase::Finalizing);
        assert_eq!(v.step(&mut keep_going).unwrap(), Phase::Done);
        assert_eq!(v.finish().outcome, Outcome::Valid);
    }

    #[test]
    fn callback_sees_each_failing_check_once_per_timestep() {
        let d = ascii_domain(&["..@", "..."]);
        let sources = [p(0, 0), p(1, 0), p(2, 1)];
        let goals = [p(1, 0), p(1, 0), p(2, 0)];
        let paths = ["r", "w", "u"];
        let input = ValidationInput::new(&d, &sources, &goals, &paths);
        let mut seen = Vec::new();
        let report = Validator::default()
            .run(&input, |v| {
                seen.push((v.timestep, v.check, v.errors.len()));
                Flow::Continue
            })
            .unwrap();
        assert_eq!(
            seen,
            vec![(0, "immediate_collision", 1), (0, "domain_collision", 1)]
        );
        assert_eq!(report.outcome, Outcome::Invalid);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.error_agents, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn abort_stops_stepping_and_skips_final_checks() {
        let d = open_domain(5, 1);
        let sources = [p(0, 0), p(2, 0)];
        let goals = [p(4, 0), p(0, 0)];
        let paths = ["r3r", "4w"];
        let input = ValidationInput::new(&d, &sources, &goals, &paths);
        let mut calls = 0;
        let report = Validator::default()
            .run(&input, |_| {
                calls += 1;
                Flow::Abort
            })
            .unwrap();
        assert_eq!(calls, 1);
        assert!(report.aborted);
        assert_eq!(report.timesteps, 2);
        assert_eq!(report.outcome, Outcome::Invalid);
        assert!(report.errors.iter().all(|e| !e.contains("expected goal")));
    }

    #[test]
    fn fail_fast_policy_aborts() {
        let d = open_domain(3, 1);
        let sources = [p(0, 0), p(2, 0)];
        let goals = [p(2, 0), p(0, 0)];
        let paths = ["rr", "ll"];
        let input = ValidationInput::new(&d, &sources, &goals, &paths);
        let validator = Validator::new(ValidatorConfig {
            policy: FailurePolicy::FailFast,
            ..Default::default()
        })
        .unwrap();
        let report = validator.validate(&input).unwrap();
        assert!(report.aborted);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn interrupted_without_errors_is_skipped() {
        let d = open_domain(4, 1);
        let sources = [p(0, 0)];
        let goals = [p(3, 0)];
        let paths = ["3r"];
        let input = ValidationInput::new(&d, &sources, &goals, &paths);
        let validator = Validator::default();
        let mut v = validator.start(&input).unwrap();
        v.step(&mut keep_going).unwrap();
        v.step(&mut keep_going).unwrap();
        let report = v.finish();
        assert_eq!(report.outcome, Outcome::Skipped);
        assert!(report.aborted);
    }

    // ── Preconditions ───────────────────────────────────────────

    #[test]
    fn missing_domain_is_a_precondition_failure() {
        let points = [p(0, 0)];
        let input = ValidationInput {
            domain: None,
            sources: &points,
            goals: Some(&points),
            paths: &["w"],
        };
        let err = Validator::default().start(&input).unwrap_err();
        assert!(matches!(
            err,
            ValidateError::Precondition(PreconditionError::MissingDomain)
        ));
    }

    #[test]
    fn source_count_mismatch_is_a_precondition_failure() {
        let d = open_domain(2, 2);
        let sources = [p(0, 0)];
        let goals = [p(0, 0), p(1, 1)];
        let input = ValidationInput::new(&d, &sources, &goals, &["w", "w"]);
        let err = Validator::default().start(&input).unwrap_err();
        assert_eq!(err.to_string(), "expected 2 sources, got 1");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn goals_required_only_when_a_final_check_reads_them() {
        let d = open_domain(2, 2);
        let sources = [p(0, 0)];
        let input = ValidationInput {
            domain: Some(&d),
            sources: &sources,
            goals: None,
            paths: &["r"],
        };
        assert!(matches!(
            Validator::default().start(&input),
            Err(ValidateError::Precondition(PreconditionError::MissingGoals))
        ));

        let steps_only = Validator::new(ValidatorConfig {
            final_checks: vec![],
            ..Default::default()
        })
        .unwrap();
        let report = steps_only.validate(&input).unwrap();
        assert_eq!(report.outcome, Outcome::Valid);
    }

    #[test]
    fn timespan_limit_is_enforced() {
        let d = open_domain(2, 2);
        let sources = [p(0, 0), p(1, 1)];
        let paths = ["3w", "1000w"];
        let input = ValidationInput::new(&d, &sources, &sources, &paths);
        let validator = Validator::new(ValidatorConfig {
            max_timespan: Some(100),
            ..Default::default()
        })
        .unwrap();
        let err = validator.start(&input).unwrap_err();
        assert!(matches!(
            err,
            ValidateError::Precondition(PreconditionError::TimespanTooLong {
                agent: 1,
                timespan: 1000,
                limit: 100
            })
        ));
    }

    #[test]
    fn invalid_config_is_rejected_by_free_function() {
        let d = open_domain(2, 2);
        let points = [p(0, 0)];
        let input = ValidationInput::new(&d, &points, &points, &["w"]);
        let config = ValidatorConfig {
            chunk_capacity: 0,
            ..Default::default()
        };
        let err = validate(&input, &config, keep_going).unwrap_err();
        assert!(matches!(err, ValidateError::Config(_)));
    }

    #[test]
    fn unknown_action_check_can_be_enabled() {
        let d = open_domain(3, 3);
        let sources = [p(1, 1)];
        let paths = ["x"];
        let config = ValidatorConfig {
            checks: Check::ALL.to_vec(),
            final_checks: vec![FinalCheck::GoalReached],
            ..Default::default()
        };
        let input = ValidationInput::new(&d, &sources, &sources, &paths);
        let report = validate(&input, &config, keep_going).unwrap();
        assert_eq!(report.outcome, Outcome::Invalid);
        assert!(report.errors[0].contains("unknown action"));
    }
}
