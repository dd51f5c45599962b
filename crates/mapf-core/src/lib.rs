//! Core types for MAPF solution validation.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! spatial primitives every other crate in the workspace builds on:
//!
//! - [`Point`]: an immutable 2D integer coordinate
//! - [`Domain`]: the static grid map with a per-cell obstacle predicate
//! - [`DomainError`]: construction failures for malformed grids

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod point;

pub use domain::Domain;
pub use error::DomainError;
pub use point::Point;
