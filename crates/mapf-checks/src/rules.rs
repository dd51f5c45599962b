//! The rule implementations.
//!
//! Each function is pure: it reads its parameters and returns the
//! violations found, never mutating shared state. Pairwise rules bucket
//! agents by position in an [`IndexMap`] so they run in O(agents) per
//! timestep and report in a deterministic order (first agent index first).

use indexmap::IndexMap;
use mapf_core::Point;

use crate::params::{AgentList, CheckParameters, CheckResult, FinalCheckParameters};

/// Vertex conflicts: one error per pair of agents sharing a next position.
pub fn check_immediate_collision(params: &CheckParameters<'_>) -> CheckResult {
    let mut result = CheckResult::ok();
    let mut cells: IndexMap<Point, AgentList> = IndexMap::with_capacity(params.next.len());
    for (agent, &pos) in params.next.iter().enumerate() {
        cells.entry(pos).or_default().push(agent);
    }
    for (pos, agents) in cells.iter().filter(|(_, a)| a.len() > 1) {
        for (i, &a) in agents.iter().enumerate() {
            for &b in &agents[i + 1..] {
                result.push(
                    format!(
                        "agent {a} collided with agent {b} at {pos} at timestep {}",
                        params.arrival()
                    ),
                    &[a, b],
                );
            }
        }
    }
    result
}

/// Agents whose next position is off the grid.
pub fn check_domain_out_of_bounds(params: &CheckParameters<'_>) -> CheckResult {
    let mut result = CheckResult::ok();
    for (agent, &pos) in params.next.iter().enumerate() {
        if !params.domain.contains(pos) {
            result.push(
                format!(
                    "agent {agent} is out of bounds at {pos} at timestep {} (map is {}x{})",
                    params.arrival(),
                    params.domain.width(),
                    params.domain.height()
                ),
                &[agent],
            );
        }
    }
    result
}

/// Agents whose next position is an obstacle. Off-grid positions are left
/// to [`check_domain_out_of_bounds`].
pub fn check_domain_collision(params: &CheckParameters<'_>) -> CheckResult {
    let mut result = CheckResult::ok();
    for (agent, &pos) in params.next.iter().enumerate() {
        if params.domain.is_obstacle(pos) {
            result.push(
                format!(
                    "agent {agent} collided with an obstacle at {pos} at timestep {}",
                    params.arrival()
                ),
                &[agent],
            );
        }
    }
    result
}

/// Swap conflicts: agent `a` moves `p -> q` while agent `b` moves `q -> p`.
///
/// Waiting agents never swap, and two agents taking the same edge in the
/// same direction are a vertex conflict, not an edge conflict.
pub fn check_edge_collision(params: &CheckParameters<'_>) -> CheckResult {
    let mut result = CheckResult::ok();
    let mut edges: IndexMap<(Point, Point), AgentList> = IndexMap::new();
    for (agent, (&from, &to)) in params.prev.iter().zip(params.next).enumerate() {
        if from != to {
            edges.entry((from, to)).or_default().push(agent);
        }
    }
    for (&(from, to), agents) in &edges {
        let Some(reverse) = edges.get(&(to, from)) else {
            continue;
        };
        for &a in agents {
            for &b in reverse.iter().filter(|&&b| b > a) {
                result.push(
                    format!(
                        "agent {a} and agent {b} swapped {from} and {to} at timestep {}",
                        params.arrival()
                    ),
                    &[a, b],
                );
            }
        }
    }
    result
}

/// Agents whose record used a symbol outside `u d l r w`.
///
/// Such symbols decode as waits; this rule surfaces them for callers that
/// want malformed records flagged rather than silently tolerated.
pub fn check_unknown_action(params: &CheckParameters<'_>) -> CheckResult {
    let mut result = CheckResult::ok();
    for (agent, action) in params.actions.iter().enumerate() {
        if !action.is_known() {
            result.push(
                format!(
                    "agent {agent} used unknown action {:?} at timestep {}",
                    action.symbol(),
                    params.arrival()
                ),
                &[agent],
            );
        }
    }
    result
}

/// Agents whose terminal position differs from their declared goal.
pub fn check_goal_reached(params: &FinalCheckParameters<'_>) -> CheckResult {
    let mut result = CheckResult::ok();
    let Some(goals) = params.goals else {
        result.push("goal check requires goal points".to_string(), &[]);
        return result;
    };
    for (agent, &pos) in params.current.iter().enumerate() {
        match goals.get(agent) {
            Some(&goal) if goal == pos => {}
            Some(&goal) => result.push(
                format!(
                    "agent {agent} ended at {pos} at timestep {}, expected goal {goal}",
                    params.timestep
                ),
                &[agent],
            ),
            None => result.push(format!("agent {agent} has no declared goal"), &[agent]),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapf_codec::Action;
    use mapf_core::Domain;
    use mapf_test_utils::{ascii_domain, open_domain, p};
    use proptest::prelude::*;

    fn params<'a>(
        prev: &'a [Point],
        next: &'a [Point],
        actions: &'a [Action],
        domain: &'a Domain,
    ) -> CheckParameters<'a> {
        CheckParameters {
            prev,
            next,
            actions,
            domain,
            sources: prev,
            timestep: 4,
            goals: None,
        }
    }

    // ── Immediate collision ─────────────────────────────────────

    #[test]
    fn two_agents_on_same_cell_give_one_error() {
        let d = open_domain(6, 6);
        let prev = [p(3, 2), p(2, 3)];
        let next = [p(3, 3), p(3, 3)];
        let r = check_immediate_collision(&params(&prev, &next, &[], &d));
        assert_eq!(r.len(), 1);
        assert_eq!(r.error_agents[0].as_slice(), &[0, 1]);
        assert_eq!(r.errors[0], "agent 0 collided with agent 1 at (3, 3) at timestep 5");
    }

    #[test]
    fn three_agents_on_same_cell_give_three_pairs() {
        let d = open_domain(6, 6);
        let prev = [p(0, 0), p(1, 0), p(2, 0)];
        let next = [p(1, 1); 3];
        let r = check_immediate_collision(&params(&prev, &next, &[], &d));
        let pairs: Vec<&[usize]> = r.error_agents.iter().map(|a| a.as_slice()).collect();
        assert_eq!(pairs, vec![&[0, 1][..], &[0, 2][..], &[1, 2][..]]);
    }

    #[test]
    fn distinct_cells_do_not_collide() {
        let d = open_domain(6, 6);
        let prev = [p(0, 0), p(1, 0)];
        let next = [p(0, 1), p(1, 1)];
        assert!(check_immediate_collision(&params(&prev, &next, &[], &d)).is_ok());
    }

    // ── Domain ──────────────────────────────────────────────────

    #[test]
    fn out_of_bounds_on_every_side() {
        let d = open_domain(3, 3);
        let prev = [p(0, 0), p(2, 2), p(0, 0), p(2, 2), p(1, 1)];
        let next = [p(-1, 0), p(3, 2), p(0, -1), p(2, 3), p(1, 1)];
        let r = check_domain_out_of_bounds(&params(&prev, &next, &[], &d));
        assert_eq!(r.agents(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn obstacle_hit_is_reported_only_in_bounds() {
        let d = ascii_domain(&[".@", ".."]);
        let prev = [p(0, 0), p(1, 1)];
        let next = [p(1, 0), p(2, 1)];
        let r = check_domain_collision(&params(&prev, &next, &[], &d));
        assert_eq!(r.agents(), vec![0]);
        assert!(r.errors[0].contains("obstacle at (1, 0)"));
    }

    // ── Edge collision ──────────────────────────────────────────

    #[test]
    fn swap_is_an_edge_collision() {
        let d = open_domain(6, 6);
        let prev = [p(2, 2), p(2, 3)];
        let next = [p(2, 3), p(2, 2)];
        let r = check_edge_collision(&params(&prev, &next, &[], &d));
        assert_eq!(r.len(), 1);
        assert_eq!(r.error_agents[0].as_slice(), &[0, 1]);
    }

    #[test]
    fn moving_apart_is_not_an_edge_collision() {
        let d = open_domain(6, 6);
        let prev = [p(2, 2), p(2, 3)];
        let next = [p(2, 2), p(5, 5)];
        assert!(check_edge_collision(&params(&prev, &next, &[], &d)).is_ok());
    }

    #[test]
    fn following_is_not_an_edge_collision() {
        let d = open_domain(6, 6);
        let prev = [p(1, 0), p(0, 0)];
        let next = [p(2, 0), p(1, 0)];
        assert!(check_edge_collision(&params(&prev, &next, &[], &d)).is_ok());
    }

    // ── Unknown actions ─────────────────────────────────────────

    #[test]
    fn unknown_symbols_are_flagged() {
        let d = open_domain(3, 3);
        let prev = [p(0, 0), p(1, 1)];
        let actions = [Action::Unknown('x'), Action::Wait];
        let r = check_unknown_action(&params(&prev, &prev, &actions, &d));
        assert_eq!(r.agents(), vec![0]);
        assert_eq!(r.errors[0], "agent 0 used unknown action 'x' at timestep 5");
    }

    // ── Goal reached ────────────────────────────────────────────

    #[test]
    fn goal_mismatch_reported_per_agent() {
        let d = open_domain(5, 5);
        let current = [p(0, 2), p(4, 3)];
        let goals = [p(0, 2), p(4, 4)];
        let r = check_goal_reached(&FinalCheckParameters {
            current: &current,
            domain: &d,
            sources: &current,
            timestep: 2,
            goals: Some(&goals),
        });
        assert_eq!(r.len(), 1);
        assert_eq!(r.agents(), vec![1]);
        assert_eq!(
            r.errors[0],
            "agent 1 ended at (4, 3) at timestep 2, expected goal (4, 4)"
        );
    }

    #[test]
    fn missing_goals_fail_the_check() {
        let d = open_domain(5, 5);
        let current = [p(0, 2)];
        let r = check_goal_reached(&FinalCheckParameters {
            current: &current,
            domain: &d,
            sources: &current,
            timestep: 0,
            goals: None,
        });
        assert!(!r.is_ok());
    }

    proptest! {
        #[test]
        fn vertex_errors_match_naive_pair_count(
            cells in prop::collection::vec((0i32..3, 0i32..3), 0..12)
        ) {
            let d = open_domain(3, 3);
            let next: Vec<Point> = cells.iter().map(|&(x, y)| p(x, y)).collect();
            let mut naive = 0;
            for i in 0..next.len() {
                for j in i + 1..next.len() {
                    if next[i] == next[j] {
                        naive += 1;
                    }
                }
            }
            let r = check_immediate_collision(&params(&next, &next, &[], &d));
            prop_assert_eq!(r.len(), naive);
        }
    }
}
