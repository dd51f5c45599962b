//! Validation orchestrator for MAPF solution submissions.
//!
//! Drives a [`Seeker`](mapf_codec::Seeker) across every timestep of a batch,
//! runs the configured checks against each lock-step snapshot, and reports an
//! [`Outcome`] with the accumulated error list.
//!
//! # Architecture
//!
//! - [`ValidatorConfig`]: rule selection, failure policy, buffer sizing
//! - [`Validator`]: reusable, immutable entry point (`Send + Sync`)
//! - [`Validation`]: one batch's state machine
//!   (`Initializing -> Stepping -> Finalizing -> Done`), steppable by the
//!   caller so it can stop between timesteps
//! - [`submission`]: grouping of stored submission entries into batches,
//!   with stale-entry and already-validated handling
//!
//! # Example
//!
//! ```
//! use mapf_core::{Domain, Point};
//! use mapf_engine::{Outcome, ValidationInput, Validator};
//!
//! let domain = Domain::open(5, 5).unwrap();
//! let sources = [Point::new(0, 0), Point::new(4, 4)];
//! let goals = [Point::new(0, 2), Point::new(4, 4)];
//! let paths = ["dd", ""];
//!
//! let input = ValidationInput::new(&domain, &sources, &goals, &paths);
//! let report = Validator::default().validate(&input).unwrap();
//! assert_eq!(report.outcome, Outcome::Valid);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod outcome;
pub mod submission;
pub mod validate;

pub use config::{ConfigError, FailurePolicy, ValidatorConfig};
pub use error::{PreconditionError, ValidateError};
pub use outcome::{Outcome, ValidationReport};
pub use submission::{
    split_records, validate_submissions, EntryVerdict, GroupReport, Instance, SubmissionEntry,
    SubmissionReport,
};
pub use validate::{validate, Flow, Phase, Validation, ValidationInput, Validator, Violation};

// Compile-time assertion: a Validator can be shared across worker threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send_sync::<Validator>();
    }
};
