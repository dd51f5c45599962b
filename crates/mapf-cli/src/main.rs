//! `mapf-validate`: check MAPF solution paths against a MovingAI instance.
//!
//! Reads a `.map` grid and a `.scen` agent list, then either validates one
//! newline-separated path file (`check`) or a JSON list of stored submission
//! entries (`submissions`). The verdict is printed to stdout and reflected in
//! the exit code (see [`exit_codes`]).

mod exit_codes;
mod logging;
mod output;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use mapf_checks::Check;
use mapf_core::Domain;
use mapf_engine::{
    split_records, validate_submissions, FailurePolicy, Instance, Outcome, SubmissionEntry,
    ValidationInput, Validator, ValidatorConfig,
};
use mapf_scenario::{parse_map, parse_scenario, Scenario};
use tracing::info;

use crate::output::Format;

/// Record given to agents the path file has no line for.
const MISSING_PATH: &str = "w";

#[derive(Parser)]
#[command(
    name = "mapf-validate",
    version,
    about = "Validate multi-agent pathfinding solutions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate one path file (one encoded record per line, agent i on line i).
    Check {
        #[command(flatten)]
        common: Common,
        /// Path file.
        #[arg(long)]
        paths: PathBuf,
        /// Number of scenario agents to validate. Defaults to the number of
        /// records in the path file; extra records are ignored and missing
        /// ones wait in place.
        #[arg(long)]
        agents: Option<usize>,
    },
    /// Validate a JSON array of stored submission entries.
    Submissions {
        #[command(flatten)]
        common: Common,
        /// JSON file of entries.
        #[arg(long)]
        entries: PathBuf,
    },
}

#[derive(Args)]
struct Common {
    /// MovingAI `.map` file.
    #[arg(long)]
    map: PathBuf,
    /// MovingAI `.scen` file.
    #[arg(long)]
    scen: PathBuf,
    /// TOML validator configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Stop at the first failing timestep.
    #[arg(long)]
    fail_fast: bool,
    /// Reject records spanning more timesteps than this (overrides the
    /// config file).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_timespan: Option<u64>,
    /// Per-step checks to run, comma-separated (overrides the config file).
    #[arg(long, value_delimiter = ',')]
    checks: Option<Vec<Check>>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

impl Common {
    fn validator(&self) -> Result<Validator> {
        let mut config = match &self.config {
            Some(path) => ValidatorConfig::load(path)?,
            None => ValidatorConfig::default(),
        };
        if self.fail_fast {
            config.policy = FailurePolicy::FailFast;
        }
        if let Some(limit) = self.max_timespan {
            config.max_timespan = Some(limit);
        }
        if let Some(checks) = &self.checks {
            config.checks = checks.clone();
        }
        Ok(Validator::new(config)?)
    }

    fn instance(&self) -> Result<(Domain, Scenario)> {
        let domain = parse_map(&read(&self.map)?)
            .with_context(|| format!("parse {}", self.map.display()))?;
        let scenario = parse_scenario(&read(&self.scen)?)
            .with_context(|| format!("parse {}", self.scen.display()))?;
        scenario.check_domain(&domain).with_context(|| {
            format!("{} does not match {}", self.scen.display(), self.map.display())
        })?;
        Ok((domain, scenario))
    }
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let code = match run(cli, &mut stdout.lock()) {
        Ok(outcome) => exit_codes::for_outcome(outcome),
        Err(err) => {
            eprintln!("error: {err:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli, out: &mut dyn Write) -> Result<Outcome> {
    match cli.command {
        Command::Check {
            common,
            paths,
            agents,
        } => cmd_check(&common, &paths, agents, out),
        Command::Submissions { common, entries } => cmd_submissions(&common, &entries, out),
    }
}

fn cmd_check(
    common: &Common,
    paths: &Path,
    agents: Option<usize>,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let validator = common.validator()?;
    let (domain, mut scenario) = common.instance()?;
    let text = read(paths)?;
    let mut records = split_records(&text);

    let n = agents.unwrap_or(records.len());
    if scenario.len() < n {
        bail!("scenario has {} agents, {n} requested", scenario.len());
    }
    scenario.truncate(n);
    info!(agents = n, records = records.len(), "validating path file");
    records.resize(n, MISSING_PATH);

    let input = ValidationInput::new(&domain, &scenario.sources, &scenario.goals, &records);
    let report = validator.validate(&input)?;
    output::batch(out, common.format, n, &report)?;
    Ok(report.outcome)
}

fn cmd_submissions(common: &Common, entries: &Path, out: &mut dyn Write) -> Result<Outcome> {
    let validator = common.validator()?;
    let (domain, scenario) = common.instance()?;
    let entries: Vec<SubmissionEntry> = serde_json::from_str(&read(entries)?)
        .with_context(|| format!("parse {}", entries.display()))?;

    let instance = Instance {
        domain: &domain,
        sources: &scenario.sources,
        goals: &scenario.goals,
    };
    let report = validate_submissions(&validator, &instance, &entries);
    output::submissions(out, common.format, &report)?;
    Ok(report.outcome)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
