//! Rule checks for MAPF solutions.
//!
//! Every rule is a pure function over a read-only snapshot of agent
//! positions. Per-step rules receive [`CheckParameters`] once per timestep;
//! final rules receive [`FinalCheckParameters`] once, after the last
//! timestep. Rules are independent of each other and of the decode engine,
//! so callers select any subset through the closed [`Check`] and
//! [`FinalCheck`] enums.
//!
//! # Rules
//!
//! | Rule | Kind | Fails when |
//! |------|------|------------|
//! | [`Check::ImmediateCollision`] | per-step | two agents share a cell |
//! | [`Check::DomainOutOfBounds`] | per-step | an agent leaves the grid |
//! | [`Check::DomainCollision`] | per-step | an agent enters an obstacle |
//! | [`Check::EdgeCollision`] | per-step | two agents swap cells |
//! | [`Check::UnknownAction`] | per-step | a record uses a symbol outside the alphabet |
//! | [`FinalCheck::GoalReached`] | final | an agent does not end on its goal |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod check;
pub mod params;
pub mod rules;

pub use check::{Check, FinalCheck, UnknownCheckError};
pub use params::{AgentList, CheckParameters, CheckResult, FinalCheckParameters};
