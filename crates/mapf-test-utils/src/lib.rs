//! Test utilities and fixtures for MAPF validator development.
//!
//! Provides small domain builders, a point shorthand, and proptest
//! strategies for well-formed motion records.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod strategies;

pub use fixtures::{ascii_domain, open_domain, p, walk};
pub use strategies::{arb_action_symbol, arb_record, arb_run};
