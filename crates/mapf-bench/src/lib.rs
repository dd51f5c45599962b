//! Reference workloads for benchmarking the MAPF validator.
//!
//! - [`corridor`]: one agent per row walking the full width; long runs,
//!   few symbols
//! - [`shuttle`]: agents stepping back and forth; one symbol per timestep,
//!   the worst case for run decoding
//!
//! Both produce valid batches, so a validator runs every timestep and every
//! final check.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use mapf_core::{Domain, Point};

/// A batch ready to hand to a validator.
#[derive(Clone, Debug)]
pub struct Workload {
    /// The map.
    pub domain: Domain,
    /// Agent start points.
    pub sources: Vec<Point>,
    /// Agent goal points.
    pub goals: Vec<Point>,
    /// Encoded motion records.
    pub paths: Vec<String>,
}

impl Workload {
    /// Number of agents.
    pub fn agents(&self) -> usize {
        self.paths.len()
    }
}

/// `agents` agents on an open `(length + 1) x agents` grid, each walking
/// `length` cells right along its own row.
pub fn corridor(agents: usize, length: u32) -> Workload {
    let width = length as usize + 1;
    let domain = Domain::open(width, agents.max(1)).expect("corridor grid fits i32 coordinates");
    let sources = (0..agents).map(|y| Point::new(0, y as i32)).collect();
    let goals = (0..agents)
        .map(|y| Point::new(length as i32, y as i32))
        .collect();
    let paths = vec![format!("{length}r"); agents];
    Workload {
        domain,
        sources,
        goals,
        paths,
    }
}

/// `agents` agents on an open `2 x agents` grid, each alternating `r` and
/// `l` for `rounds` round trips.
pub fn shuttle(agents: usize, rounds: usize) -> Workload {
    let domain = Domain::open(2, agents.max(1)).expect("shuttle grid fits i32 coordinates");
    let sources: Vec<Point> = (0..agents).map(|y| Point::new(0, y as i32)).collect();
    let goals = sources.clone();
    let paths = vec!["rl".repeat(rounds); agents];
    Workload {
        domain,
        sources,
        goals,
        paths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corridor_shape() {
        let w = corridor(3, 10);
        assert_eq!(w.agents(), 3);
        assert_eq!((w.domain.width(), w.domain.height()), (11, 3));
        assert_eq!(w.paths[2], "10r");
        assert_eq!(w.goals[2], Point::new(10, 2));
    }

    #[test]
    fn shuttle_returns_home() {
        let w = shuttle(2, 5);
        assert_eq!(w.paths[0].len(), 10);
        assert_eq!(w.sources, w.goals);
    }
}
