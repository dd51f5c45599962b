//! Report rendering for stdout.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use mapf_engine::{SubmissionReport, ValidationReport};
use serde::Serialize;

/// Output format selected with `--format`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Write a single-batch report.
pub fn batch(
    out: &mut dyn Write,
    format: Format,
    agents: usize,
    report: &ValidationReport,
) -> Result<()> {
    match format {
        Format::Json => json(out, report),
        Format::Text => {
            writeln!(out, "outcome: {}", report.outcome)?;
            writeln!(out, "agents: {agents}, timesteps: {}", report.timesteps)?;
            if report.aborted {
                writeln!(out, "stopped early")?;
            }
            for error in &report.errors {
                writeln!(out, "error: {error}")?;
            }
            if let Some(prefix) = report.valid_prefix().filter(|&p| p > 0) {
                writeln!(out, "valid prefix: first {prefix} agents")?;
            }
            Ok(())
        }
    }
}

/// Write a submission-set report.
pub fn submissions(out: &mut dyn Write, format: Format, report: &SubmissionReport) -> Result<()> {
    match format {
        Format::Json => json(out, report),
        Format::Text => {
            writeln!(out, "outcome: {}", report.outcome)?;
            for group in &report.groups {
                writeln!(
                    out,
                    "group {}: {} ({} agents)",
                    group.agent_count_intent, group.report.outcome, group.batch_size
                )?;
            }
            for verdict in &report.verdicts {
                writeln!(out, "{}: {}", verdict.id, verdict.outcome)?;
            }
            for error in &report.errors {
                writeln!(out, "error: {error}")?;
            }
            Ok(())
        }
    }
}

fn json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value).context("serialize report")?;
    writeln!(out, "{payload}")?;
    Ok(())
}
