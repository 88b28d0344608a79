//! Per-mode running statistics. Lives only as long as the session.

use std::collections::BTreeMap;

use serde::Serialize;

/// Totals for one mode. Solve times are only ever appended, one per correct
/// solve, so `times().len() == correct_count()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    times: Vec<f64>,
    correct_count: u32,
    incorrect_count: u32,
}

impl Stats {
    pub fn record_correct(&mut self, elapsed_secs: f64) {
        self.times.push(elapsed_secs);
        self.correct_count += 1;
    }

    pub fn record_incorrect(&mut self) {
        self.incorrect_count += 1;
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    pub fn total(&self) -> u32 {
        self.correct_count + self.incorrect_count
    }

    /// Mean solve time in seconds, 0 before the first solve.
    pub fn average_time(&self) -> f64 {
        if self.times.is_empty() {
            0.0
        } else {
            self.times.iter().sum::<f64>() / self.times.len() as f64
        }
    }

    /// Correct solves as a percentage of all judged attempts, 0 before the first.
    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total > 0 {
            self.correct_count as f64 / total as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Stats keyed by mode index.
#[derive(Debug, Clone, Default)]
pub struct StatsTable {
    by_mode: BTreeMap<usize, Stats>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, mode_index: usize) -> Option<&Stats> {
        self.by_mode.get(&mode_index)
    }

    /// Stats for a mode, created empty on first use.
    pub fn entry(&mut self, mode_index: usize) -> &mut Stats {
        self.by_mode.entry(mode_index).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Stats)> {
        self.by_mode.iter().map(|(&index, stats)| (index, stats))
    }
}
