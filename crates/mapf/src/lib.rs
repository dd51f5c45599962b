//! MAPF: a streaming validator for multi-agent pathfinding solutions.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! MAPF sub-crates. For most users, adding `mapf` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use mapf::prelude::*;
//!
//! let domain = parse_map("type octile\nheight 5\nwidth 5\nmap\n.....\n.....\n.....\n.....\n.....\n")
//!     .unwrap();
//! let scenario = parse_scenario(
//!     "version 1\n0\tm.map\t5\t5\t0\t0\t0\t2\t2\n0\tm.map\t5\t5\t4\t4\t4\t4\t0\n",
//! )
//! .unwrap();
//!
//! let paths = split_records("dd\n\n");
//! let input = ValidationInput::new(&domain, &scenario.sources, &scenario.goals, &paths);
//! let report = Validator::default().validate(&input).unwrap();
//! assert_eq!(report.outcome, Outcome::Valid);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mapf-core` | `Point`, `Domain` |
//! | [`codec`] | `mapf-codec` | Motion record codec, `Reader`, `Seeker` |
//! | [`checks`] | `mapf-checks` | Validation rules and their parameters |
//! | [`engine`] | `mapf-engine` | `Validator`, configuration, outcomes, submissions |
//! | [`scenario`] | `mapf-scenario` | MovingAI `.map` / `.scen` parsers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Spatial primitives (`mapf-core`).
pub use mapf_core as types;

/// Motion record codec and lock-step streaming (`mapf-codec`).
///
/// [`codec::Reader`] streams one agent's record; [`codec::Seeker`] advances
/// every agent together.
pub use mapf_codec as codec;

/// Validation rules (`mapf-checks`).
pub use mapf_checks as checks;

/// Validation orchestration (`mapf-engine`).
///
/// [`engine::Validator`] checks one batch; [`engine::validate_submissions`]
/// checks a set of stored submission entries.
pub use mapf_engine as engine;

/// MovingAI benchmark file parsers (`mapf-scenario`).
pub use mapf_scenario as scenario;

/// Common imports for typical validator usage.
///
/// ```rust
/// use mapf::prelude::*;
/// ```
pub mod prelude {
    // Spatial types
    pub use mapf_core::{Domain, Point};

    // Codec
    pub use mapf_codec::{Action, SeekError};

    // Rules
    pub use mapf_checks::{Check, FinalCheck};

    // Engine
    pub use mapf_engine::{
        split_records, validate_submissions, FailurePolicy, Flow, Outcome, ValidateError,
        ValidationInput, ValidationReport, Validator, ValidatorConfig, Violation,
    };

    // Parsers
    pub use mapf_scenario::{parse_map, parse_scenario, Scenario};
}
