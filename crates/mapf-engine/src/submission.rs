//! Validation of stored submission entries.
//!
//! A submission is a set of entries, one per agent path, uploaded possibly
//! many times. Entries are grouped by the agent count the submitter intended
//! to solve; within a group only the newest entry per agent index is
//! checked and older ones are reported [`Outcome::Outdated`]. Each group is
//! validated as one batch against the instance's first `batch_size` agents.

use indexmap::IndexMap;
use mapf_core::{Domain, Point};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::FailurePolicy;
use crate::outcome::{Outcome, ValidationReport};
use crate::validate::{ValidationInput, Validator};

/// Path used for agents the group has no entry for.
const MISSING_PATH: &str = "w";

/// One stored agent path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionEntry {
    /// Storage identifier, echoed in the verdict.
    pub id: String,
    /// Agent index within the instance.
    pub index: usize,
    /// Number of agents the submitter meant to solve.
    pub agent_count_intent: usize,
    /// Encoded motion record.
    pub path: String,
    /// Creation time; larger is newer.
    pub created_at: u64,
    /// Whether a verdict was already recorded for this entry.
    #[serde(default)]
    pub validated: bool,
}

/// The problem instance submissions are checked against.
#[derive(Clone, Copy, Debug)]
pub struct Instance<'a> {
    /// The map.
    pub domain: &'a Domain,
    /// Source of every agent in the instance.
    pub sources: &'a [Point],
    /// Goal of every agent in the instance.
    pub goals: &'a [Point],
}

/// The verdict to record for one entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryVerdict {
    /// The entry's storage identifier.
    pub id: String,
    /// Its verdict.
    pub outcome: Outcome,
    /// Violations from the entry's batch; empty for outdated entries.
    pub errors: Vec<String>,
}

/// The result of validating one agent-count group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    /// The group's `agent_count_intent`.
    pub agent_count_intent: usize,
    /// Agents in the validated batch (highest index + 1).
    pub batch_size: usize,
    /// The batch's report.
    pub report: ValidationReport,
}

/// The result of [`validate_submissions`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReport {
    /// Overall verdict.
    pub outcome: Outcome,
    /// Every group's violations, concatenated in group order.
    pub errors: Vec<String>,
    /// Per-group results in first-seen order.
    pub groups: Vec<GroupReport>,
    /// Per-entry verdicts in input order.
    pub verdicts: Vec<EntryVerdict>,
}

/// Validate a submission's entries against `instance`.
///
/// Returns [`Outcome::Skipped`] without validating anything when every entry
/// (or none at all) is already validated. Otherwise the overall outcome is
/// `Error` if any group could not be validated, `Invalid` if any group has
/// violations, and `Valid` when every group passes.
///
/// There is no deadline of its own; bound the work with
/// [`ValidatorConfig::max_timespan`](crate::ValidatorConfig::max_timespan).
pub fn validate_submissions(
    validator: &Validator,
    instance: &Instance<'_>,
    entries: &[SubmissionEntry],
) -> SubmissionReport {
    if entries.iter().all(|e| e.validated) {
        info!(entries = entries.len(), "all entries already validated, skipping");
        return SubmissionReport {
            outcome: Outcome::Skipped,
            errors: Vec::new(),
            groups: Vec::new(),
            verdicts: Vec::new(),
        };
    }

    let mut groups: IndexMap<usize, IndexMap<usize, usize>> = IndexMap::new();
    for (i, entry) in entries.iter().enumerate() {
        let latest = groups.entry(entry.agent_count_intent).or_default();
        match latest.get(&entry.index) {
            Some(&held) if entries[held].created_at >= entry.created_at => {}
            _ => {
                latest.insert(entry.index, i);
            }
        }
    }

    let mut verdicts: Vec<Option<EntryVerdict>> = vec![None; entries.len()];
    let mut reports = Vec::with_capacity(groups.len());
    for (&intent, latest) in &groups {
        let highest = latest.keys().max().copied().unwrap_or(0);
        let fits = |n: usize| n <= instance.sources.len() && n <= instance.goals.len();
        let (batch_size, report) = match highest.checked_add(1) {
            Some(n) if fits(n) => {
                let paths: Vec<&str> = (0..n)
                    .map(|index| {
                        latest
                            .get(&index)
                            .map_or(MISSING_PATH, |&i| entries[i].path.as_str())
                    })
                    .collect();
                info!(
                    agent_count_intent = intent,
                    batch_size = n,
                    entries = latest.len(),
                    "validating submission group"
                );
                (n, validate_group(validator, instance, &paths))
            }
            size => (
                size.unwrap_or(usize::MAX),
                ValidationReport::error(format!(
                    "submission has agent index {highest}, instance has {} sources and {} goals",
                    instance.sources.len(),
                    instance.goals.len()
                )),
            ),
        };
        log_report(validator, intent, &report);

        for &i in latest.values() {
            verdicts[i] = Some(EntryVerdict {
                id: entries[i].id.clone(),
                outcome: report.outcome,
                errors: report.errors.clone(),
            });
        }
        reports.push(GroupReport {
            agent_count_intent: intent,
            batch_size,
            report,
        });
    }

    let verdicts = verdicts
        .into_iter()
        .zip(entries)
        .map(|(verdict, entry)| {
            verdict.unwrap_or_else(|| EntryVerdict {
                id: entry.id.clone(),
                outcome: Outcome::Outdated,
                errors: Vec::new(),
            })
        })
        .collect();

    let outcome = if reports.iter().any(|g| g.report.outcome == Outcome::Error) {
        Outcome::Error
    } else if reports.iter().any(|g| !g.report.errors.is_empty()) {
        Outcome::Invalid
    } else {
        Outcome::Valid
    };
    SubmissionReport {
        outcome,
        errors: reports
            .iter()
            .flat_map(|g| g.report.errors.iter().cloned())
            .collect(),
        groups: reports,
        verdicts,
    }
}

/// Validate `paths` against the instance's first `paths.len()` agents, which
/// the caller has checked exist.
fn validate_group(
    validator: &Validator,
    instance: &Instance<'_>,
    paths: &[&str],
) -> ValidationReport {
    let n = paths.len();
    let input = ValidationInput::new(
        instance.domain,
        &instance.sources[..n],
        &instance.goals[..n],
        paths,
    );
    validator
        .validate(&input)
        .unwrap_or_else(|e| ValidationReport::error(e.to_string()))
}

fn log_report(validator: &Validator, intent: usize, report: &ValidationReport) {
    match report.outcome {
        Outcome::Valid => info!(agent_count_intent = intent, "submission group valid"),
        Outcome::Error => warn!(
            agent_count_intent = intent,
            error = report.errors.first().map_or("", String::as_str),
            "submission group could not be validated"
        ),
        _ => {
            warn!(
                agent_count_intent = intent,
                errors = report.errors.len(),
                "submission group invalid"
            );
            if validator.config().policy == FailurePolicy::Comprehensive {
                if let Some(prefix) = report.valid_prefix().filter(|&p| p > 0) {
                    warn!(
                        agent_count_intent = intent,
                        valid_prefix = prefix,
                        "errors begin at agent {prefix}; the first {prefix} agents may form a valid solution"
                    );
                }
            }
        }
    }
}

/// Split newline-joined records into one record per agent.
///
/// A single trailing newline does not add an agent, and `\r\n` line endings
/// are accepted. Empty lines are agents with empty records.
///
/// ```
/// use mapf_engine::split_records;
///
/// assert_eq!(split_records("2r\n\nu\n"), vec!["2r", "", "u"]);
/// assert_eq!(split_records(""), vec![""]);
/// ```
pub fn split_records(text: &str) -> Vec<&str> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
