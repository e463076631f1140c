//! Per-object outcomes of a multi-object bake invocation
//!
//! Failures are isolated per object: each entry carries either that object's
//! bake counters or the error that aborted it, and [`BakeReport::summary`]
//! renders the user-facing success/failure listing.

use std::fmt::Write as _;

use crate::bake::BakeStats;
use crate::error::BakeError;

/// Result of baking one object
#[derive(Debug, Clone)]
pub struct BakeOutcome {
    /// Object name, as given in the job
    pub name: String,
    pub result: Result<BakeStats, BakeError>,
}

impl BakeOutcome {
    pub fn new(name: String, result: Result<BakeStats, BakeError>) -> Self {
        Self { name, result }
    }
}

/// Ordered outcomes of an invocation
#[derive(Debug, Clone, Default)]
pub struct BakeReport {
    pub outcomes: Vec<BakeOutcome>,
}

impl BakeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: BakeOutcome) {
        self.outcomes.push(outcome);
    }

    /// Number of objects baked successfully
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of objects that failed
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Whether every object succeeded
    pub fn all_ok(&self) -> bool {
        self.failed() == 0
    }

    /// Human-readable per-object listing
    pub fn summary(&self) -> String {
        let mut out = format!(
            "baked {}/{} objects\n",
            self.succeeded(),
            self.outcomes.len()
        );
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(stats) => {
                    let _ = writeln!(
                        out,
                        "  {}: ok ({} texels written, {} rejected)",
                        outcome.name,
                        stats.texels_written,
                        stats.rejected()
                    );
                }
                Err(err) => {
                    let _ = writeln!(out, "  {}: failed: {err}", outcome.name);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_and_summary() {
        let mut report = BakeReport::new();
        report.push(BakeOutcome::new(
            "wall".into(),
            Ok(BakeStats {
                texels_written: 100,
                texels_covered: 120,
                rejected_occluded: 20,
                ..Default::default()
            }),
        ));
        report.push(BakeOutcome::new(
            "rock".into(),
            Err(BakeError::MissingUvLayer { uvs: 0, vertices: 8 }),
        ));

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_ok());

        let summary = report.summary();
        assert!(summary.contains("baked 1/2"));
        assert!(summary.contains("wall: ok (100 texels written, 20 rejected)"));
        assert!(summary.contains("rock: failed:"));
    }
}
