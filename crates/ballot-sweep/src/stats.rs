//! Run statistics: depth-indexed histograms and run-wide counters
//!
//! Purely additive. Every counter grows monotonically and nothing is ever
//! removed; the struct is owned by the run that created it and read only
//! for reporting. Depth indices are the number of messages delivered on
//! the branch when the event was observed.

use serde::{Deserialize, Serialize};

/// All counters accumulated over one exploration run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepStats {
    /// Visits per depth
    pub depth_visits: Vec<u64>,
    /// Solutions found per depth
    pub solutions_at: Vec<u64>,
    /// Mirror hits per depth
    pub mirrors_at: Vec<u64>,
    /// Deliveries with no state change, per depth
    pub dead_messages_at: Vec<u64>,
    /// Dead-end branches per depth
    pub failures_at: Vec<u64>,
    /// Wins per decision value
    pub winners: Vec<u64>,

    /// Total solutions found
    pub solutions: u64,
    /// Total dead-end and unresolved-loop branches
    pub failures: u64,
    /// Total mirror hits
    pub mirrors: u64,
    /// Loops that nonetheless saw success below them
    pub loops: u64,
    /// Branches truncated at the depth bound
    pub limit_hits: u64,
    /// Disagreeing-commit states observed
    pub safety_violations: u64,
    /// Terminal branches of any kind
    pub breadth: u64,
    /// Total message deliveries attempted
    pub executions: u64,
    /// Deepest frame entered
    pub max_depth: u64,
}

fn bump(counter: &mut Vec<u64>, index: usize) {
    if counter.len() <= index {
        counter.resize(index + 1, 0);
    }
    counter[index] += 1;
}

impl SweepStats {
    /// Fresh, empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record entering a frame at `depth`
    pub fn record_depth_visit(&mut self, depth: usize) {
        bump(&mut self.depth_visits, depth);
        self.max_depth = self.max_depth.max(depth as u64);
    }

    /// Record a branch truncated at the depth bound
    pub fn record_limit_hit(&mut self) {
        self.limit_hits += 1;
        self.breadth += 1;
    }

    /// Record a solution committed to `winner` at `depth`
    pub fn record_solution(&mut self, depth: usize, winner: u32) {
        bump(&mut self.solutions_at, depth);
        bump(&mut self.winners, winner as usize);
        self.solutions += 1;
        self.breadth += 1;
    }

    /// Record a re-visited global state at `depth`
    pub fn record_mirror(&mut self, depth: usize) {
        bump(&mut self.mirrors_at, depth);
        self.mirrors += 1;
        self.breadth += 1;
    }

    /// Record a delivery that had no effect at `depth`
    pub fn record_dead_message(&mut self, depth: usize) {
        bump(&mut self.dead_messages_at, depth);
    }

    /// Record a true dead end at `depth`: no pending message made progress
    pub fn record_dead_end(&mut self, depth: usize) {
        bump(&mut self.failures_at, depth);
        self.failures += 1;
    }

    /// Record a cycle that still resolved somewhere below it
    pub fn record_loop(&mut self) {
        self.loops += 1;
    }

    /// Record a depth-bounded branch that never resolved
    pub fn record_unresolved_loop(&mut self) {
        self.failures += 1;
    }

    /// Record a disagreeing-commit observation
    pub fn record_safety_violation(&mut self) {
        self.safety_violations += 1;
    }

    /// Record one message delivery attempt
    pub fn record_execution(&mut self) {
        self.executions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_counters_auto_grow() {
        let mut s = SweepStats::new();
        s.record_depth_visit(0);
        s.record_depth_visit(3);
        s.record_depth_visit(3);
        assert_eq!(s.depth_visits, vec![1, 0, 0, 2]);
        assert_eq!(s.max_depth, 3);
    }

    #[test]
    fn test_solution_updates_winner_histogram() {
        let mut s = SweepStats::new();
        s.record_solution(2, 4);
        s.record_solution(5, 4);
        s.record_solution(1, 0);
        assert_eq!(s.solutions, 3);
        assert_eq!(s.winners, vec![1, 0, 0, 0, 2]);
        assert_eq!(s.breadth, 3);
    }

    #[test]
    fn test_terminal_branches_count_toward_breadth() {
        let mut s = SweepStats::new();
        s.record_limit_hit();
        s.record_mirror(6);
        s.record_solution(4, 1);
        assert_eq!(s.breadth, 3);
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let mut s = SweepStats::new();
        s.record_solution(1, 2);
        s.record_dead_message(0);
        s.record_safety_violation();

        let json = serde_json::to_string(&s).unwrap();
        let back: SweepStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
