//! Running scan statistics
//!
//! The engine itself is stateless across calls; callers that want rolling
//! numbers (scan counter, average score) keep them here. Lock-free, so a
//! concurrent caller can record from multiple threads, one update per
//! completed analysis. Nothing is persisted.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::report::CompatibilityResult;

#[derive(Debug, Default)]
pub struct ScanStats {
    total_scans: AtomicU64,
    score_sum: AtomicU64,
    current_score: AtomicU64,
    issues_found: AtomicUsize,
}

/// Point-in-time view of the counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    pub total_scans: u64,
    pub average_score: f64,
    pub current_score: u8,
    pub issues_found: usize,
}

impl ScanStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed analysis.
    pub fn record(&self, result: &CompatibilityResult) {
        self.total_scans.fetch_add(1, Ordering::Relaxed);
        self.score_sum
            .fetch_add(u64::from(result.score), Ordering::Relaxed);
        self.current_score
            .store(u64::from(result.score), Ordering::Relaxed);
        self.issues_found
            .store(result.issues.len(), Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let total_scans = self.total_scans.load(Ordering::Relaxed);
        let score_sum = self.score_sum.load(Ordering::Relaxed);

        StatsSnapshot {
            total_scans,
            average_score: if total_scans == 0 {
                0.0
            } else {
                score_sum as f64 / total_scans as f64
            },
            current_score: self.current_score.load(Ordering::Relaxed) as u8,
            issues_found: self.issues_found.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_score(score: u8) -> CompatibilityResult {
        CompatibilityResult {
            score,
            summary: String::new(),
            issues: Vec::new(),
            fixed_code: None,
        }
    }

    #[test]
    fn fresh_stats_are_zero() {
        let stats = ScanStats::new();

        let snapshot = stats.snapshot();

        assert_eq!(snapshot.total_scans, 0);
        assert_eq!(snapshot.average_score, 0.0);
        assert_eq!(snapshot.issues_found, 0);
    }

    #[test]
    fn record_updates_counter_and_average() {
        let stats = ScanStats::new();

        stats.record(&result_with_score(100));
        stats.record(&result_with_score(50));

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_scans, 2);
        assert_eq!(snapshot.average_score, 75.0);
        assert_eq!(snapshot.current_score, 50);
    }

    #[test]
    fn issues_found_tracks_the_latest_result() {
        let stats = ScanStats::new();
        let mut result = result_with_score(90);
        result.issues = Vec::new();
        stats.record(&result);

        assert_eq!(stats.snapshot().issues_found, 0);
    }

    #[test]
    fn concurrent_recording_loses_no_scans() {
        use std::sync::Arc;

        let stats = Arc::new(ScanStats::new());
        let mut handles = Vec::new();

        for _ in 0..4 {
            let stats = Arc::clone(&stats);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    stats.record(&result_with_score(80));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_scans, 400);
        assert_eq!(snapshot.average_score, 80.0);
    }
}
