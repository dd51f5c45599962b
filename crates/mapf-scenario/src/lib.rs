//! Parsers for MovingAI benchmark files.
//!
//! Turns the text of a `.map` grid into a [`Domain`](mapf_core::Domain) and
//! the text of a `.scen` file into per-agent sources and goals. Nothing else
//! in a scenario row (bucket, map name, optimal length) is interpreted.
//!
//! ```
//! use mapf_scenario::{parse_map, parse_scenario};
//!
//! let domain = parse_map("type octile\nheight 2\nwidth 3\nmap\n..@\n...\n").unwrap();
//! assert_eq!(domain.obstacle_count(), 1);
//!
//! let scen = parse_scenario(
//!     "version 1\n0\tm.map\t3\t2\t0\t0\t2\t1\t3.0\n",
//! ).unwrap();
//! assert_eq!(scen.len(), 1);
//! scen.check_domain(&domain).unwrap();
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod map;
pub mod scen;

pub use error::ScenarioError;
pub use map::{is_passable, parse_grid, parse_map};
pub use scen::{parse_scenario, Scenario};
