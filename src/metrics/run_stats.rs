//! Aggregate statistics for batches of headless games
//!
//! Tracks how each game ended, its final length and how many ticks it took,
//! with rolling windows for the averages.

use serde::Serialize;
use std::collections::VecDeque;

use crate::game::Outcome;

/// How a recorded game finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Finished(Outcome),
    /// Hit the step limit while still alive
    TimedOut,
}

/// Batch statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use grid_snake::game::Outcome;
/// use grid_snake::metrics::{GameEnd, RunStats};
///
/// let mut stats = RunStats::new(100);
/// stats.record_game(7, 120, GameEnd::Finished(Outcome::Wall));
///
/// assert_eq!(stats.total_games(), 1);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Final lengths (rolling window)
    lengths: VecDeque<usize>,

    /// Ticks per game (rolling window)
    steps: VecDeque<u32>,

    total_games: usize,
    total_steps: u64,
    best_length: usize,
    wall_crashes: usize,
    self_crashes: usize,
    wins: usize,
    timeouts: usize,

    /// Window size for rolling averages
    window_size: usize,
}

/// Serializable snapshot of a [`RunStats`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub games: usize,
    pub total_steps: u64,
    pub best_length: usize,
    pub mean_length: f32,
    pub mean_steps: f32,
    pub wall_crashes: usize,
    pub self_crashes: usize,
    pub wins: usize,
    pub timeouts: usize,
}

impl RunStats {
    /// Create a tracker keeping the last `window_size` games for averages
    pub fn new(window_size: usize) -> Self {
        Self {
            lengths: VecDeque::with_capacity(window_size),
            steps: VecDeque::with_capacity(window_size),
            total_games: 0,
            total_steps: 0,
            best_length: 0,
            wall_crashes: 0,
            self_crashes: 0,
            wins: 0,
            timeouts: 0,
            window_size,
        }
    }

    /// Record the end of one game
    pub fn record_game(&mut self, length: usize, steps: u32, end: GameEnd) {
        Self::push_deque(&mut self.lengths, length, self.window_size);
        Self::push_deque(&mut self.steps, steps, self.window_size);
        self.total_games += 1;
        self.total_steps += u64::from(steps);
        self.best_length = self.best_length.max(length);

        match end {
            GameEnd::Finished(Outcome::Wall) => self.wall_crashes += 1,
            GameEnd::Finished(Outcome::SelfCollision) => self.self_crashes += 1,
            GameEnd::Finished(Outcome::GridFull) => self.wins += 1,
            GameEnd::TimedOut => self.timeouts += 1,
        }
    }

    /// Mean final length over the rolling window, 0.0 when empty
    pub fn mean_length(&self) -> f32 {
        if self.lengths.is_empty() {
            0.0
        } else {
            self.lengths.iter().sum::<usize>() as f32 / self.lengths.len() as f32
        }
    }

    /// Mean ticks per game over the rolling window, 0.0 when empty
    pub fn mean_steps(&self) -> f32 {
        if self.steps.is_empty() {
            0.0
        } else {
            self.steps.iter().map(|&s| s as f32).sum::<f32>() / self.steps.len() as f32
        }
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }

    pub fn best_length(&self) -> usize {
        self.best_length
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            games: self.total_games,
            total_steps: self.total_steps,
            best_length: self.best_length,
            mean_length: self.mean_length(),
            mean_steps: self.mean_steps(),
            wall_crashes: self.wall_crashes,
            self_crashes: self.self_crashes,
            wins: self.wins,
            timeouts: self.timeouts,
        }
    }

    /// One-line human readable summary
    pub fn format_summary(&self) -> String {
        format!(
            "Games: {} | Steps: {} | Best: {} | Len: {:.1} | Ticks: {:.1} | Wall: {} | Self: {} | Won: {} | Timeout: {}",
            self.total_games,
            self.total_steps,
            self.best_length,
            self.mean_length(),
            self.mean_steps(),
            self.wall_crashes,
            self.self_crashes,
            self.wins,
            self.timeouts,
        )
    }

    /// Helper function to push to a deque with size limit
    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_game() {
        let mut stats = RunStats::new(100);
        stats.record_game(5, 50, GameEnd::Finished(Outcome::Wall));

        assert_eq!(stats.total_games(), 1);
        assert_eq!(stats.best_length(), 5);
        assert!((stats.mean_length() - 5.0).abs() < 1e-5);
        assert!((stats.mean_steps() - 50.0).abs() < 1e-5);
    }

    #[test]
    fn test_rolling_average() {
        let mut stats = RunStats::new(3);

        stats.record_game(2, 10, GameEnd::Finished(Outcome::Wall));
        stats.record_game(4, 20, GameEnd::Finished(Outcome::Wall));
        stats.record_game(6, 30, GameEnd::Finished(Outcome::SelfCollision));
        assert!((stats.mean_length() - 4.0).abs() < 1e-5);

        // A 4th game evicts the first
        stats.record_game(8, 40, GameEnd::TimedOut);
        assert_eq!(stats.total_games(), 4);
        assert!((stats.mean_length() - 6.0).abs() < 1e-5);
        assert_eq!(stats.best_length(), 8);
    }

    #[test]
    fn test_outcome_counters() {
        let mut stats = RunStats::new(10);
        stats.record_game(3, 10, GameEnd::Finished(Outcome::Wall));
        stats.record_game(3, 10, GameEnd::Finished(Outcome::SelfCollision));
        stats.record_game(9, 80, GameEnd::Finished(Outcome::GridFull));
        stats.record_game(4, 500, GameEnd::TimedOut);

        let summary = stats.summary();
        assert_eq!(summary.games, 4);
        assert_eq!(summary.total_steps, 600);
        assert_eq!(summary.wall_crashes, 1);
        assert_eq!(summary.self_crashes, 1);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.timeouts, 1);
    }

    #[test]
    fn test_format_summary() {
        let mut stats = RunStats::new(100);
        stats.record_game(6, 150, GameEnd::Finished(Outcome::Wall));

        let summary = stats.format_summary();
        assert!(summary.contains("Games: 1"));
        assert!(summary.contains("Steps: 150"));
        assert!(summary.contains("Best: 6"));
        assert!(summary.contains("Len: 6.0"));
        assert!(summary.contains("Wall: 1"));
    }

    #[test]
    fn test_empty_stats() {
        let stats = RunStats::new(100);
        assert_eq!(stats.mean_length(), 0.0);
        assert_eq!(stats.mean_steps(), 0.0);
        assert_eq!(stats.summary().games, 0);
    }

    #[test]
    fn test_summary_serializes() {
        let mut stats = RunStats::new(10);
        stats.record_game(3, 12, GameEnd::Finished(Outcome::Wall));

        let json = serde_json::to_value(stats.summary()).unwrap();
        assert_eq!(json["games"], 1);
        assert_eq!(json["wall_crashes"], 1);
    }
}
