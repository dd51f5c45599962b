//! MovingAI `.scen` agent lists.
//!
//! A `version` line is followed by one row per agent:
//!
//! ```text
//! bucket  map  width  height  start_x  start_y  goal_x  goal_y  optimal
//! ```
//!
//! Columns are separated by tabs or spaces. Agent `i` is row `i`.

use mapf_core::{Domain, Point};
use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;
use crate::map::number;

/// Columns up to and including `goal_y`; `optimal` may be absent.
const REQUIRED_COLUMNS: usize = 8;

/// Sources and goals of every agent in a scenario.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Text after `version`, if the header was present.
    pub version: Option<String>,
    /// Map width declared by the rows.
    pub width: usize,
    /// Map height declared by the rows.
    pub height: usize,
    /// Start point of each agent.
    pub sources: Vec<Point>,
    /// Goal point of each agent.
    pub goals: Vec<Point>,
}

impl Scenario {
    /// Number of agents.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the scenario lists no agents.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Keep only the first `n` agents.
    pub fn truncate(&mut self, n: usize) {
        self.sources.truncate(n);
        self.goals.truncate(n);
    }

    /// Fail when the rows declare a different map size from `domain`.
    ///
    /// An empty scenario declares no size and always matches.
    pub fn check_domain(&self, domain: &Domain) -> Result<(), ScenarioError> {
        if self.is_empty() || (self.width, self.height) == (domain.width(), domain.height()) {
            return Ok(());
        }
        Err(ScenarioError::SizeMismatch {
            line: 0,
            width: domain.width(),
            height: domain.height(),
            found_width: self.width,
            found_height: self.height,
        })
    }
}

/// Parse a `.scen` file.
pub fn parse_scenario(text: &str) -> Result<Scenario, ScenarioError> {
    let mut scen = Scenario::default();
    let mut size: Option<(usize, usize)> = None;

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let l = raw.trim();
        if l.is_empty() {
            continue;
        }
        if let Some(rest) = l.strip_prefix("version") {
            if scen.is_empty() && scen.version.is_none() {
                scen.version = Some(rest.trim().to_string());
                continue;
            }
            return Err(ScenarioError::BadHeader {
                line,
                text: l.to_string(),
            });
        }

        let cols: Vec<&str> = l.split_whitespace().collect();
        if cols.len() < REQUIRED_COLUMNS {
            return Err(ScenarioError::Columns {
                line,
                expected: REQUIRED_COLUMNS,
                actual: cols.len(),
            });
        }
        let width = number(line, "width", cols[2])?;
        let height = number(line, "height", cols[3])?;
        match size {
            None => size = Some((width, height)),
            Some((w, h)) if (w, h) != (width, height) => {
                return Err(ScenarioError::SizeMismatch {
                    line,
                    width: w,
                    height: h,
                    found_width: width,
                    found_height: height,
                });
            }
            Some(_) => {}
        }
        scen.sources.push(Point::new(
            number(line, "start_x", cols[4])?,
            number(line, "start_y", cols[5])?,
        ));
        scen.goals.push(Point::new(
            number(line, "goal_x", cols[6])?,
            number(line, "goal_y", cols[7])?,
        ));
    }

    if let Some((width, height)) = size {
        scen.width = width;
        scen.height = height;
    }
    Ok(scen)
}
