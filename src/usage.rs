//! Usage ledger: how many external API requests this installation has made
//! in the current 24-hour window.
//!
//! The ledger is a plain value. [`crate::run_query`] takes it by value and
//! hands back the updated copy; the caller decides whether to persist it.
//! Exhausting the budget is reported, never enforced.

use chrono::{DateTime, Duration, Utc};
use hub_search::AggregatedResults;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{HubError, Result};

/// Length of one accounting window.
pub const WINDOW_HOURS: i64 = 24;

/// Fraction of the budget below which [`UsageLedger::is_low`] is true.
const LOW_WATERMARK: f64 = 0.1;

/// Per-window request counter with a daily budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLedger {
    /// Requests made in the current window.
    pub used: u64,
    /// Requests allowed per window.
    pub daily_budget: u64,
    /// When the current window started.
    pub window_start: DateTime<Utc>,
}

impl UsageLedger {
    /// A fresh ledger whose window starts at `now`.
    pub fn new(daily_budget: u64, now: DateTime<Utc>) -> Self {
        Self {
            used: 0,
            daily_budget,
            window_start: now,
        }
    }

    /// Start a new window if at least [`WINDOW_HOURS`] have passed.
    ///
    /// Returns `true` when the ledger was reset.
    pub fn reset_if_elapsed(&mut self, now: DateTime<Utc>) -> bool {
        if now.signed_duration_since(self.window_start) >= Duration::hours(WINDOW_HOURS) {
            self.used = 0;
            self.window_start = now;
            true
        } else {
            false
        }
    }

    /// Add `units` requests to the current window.
    pub fn record(&mut self, units: u64) {
        self.used = self.used.saturating_add(units);
    }

    /// Requests left in the current window.
    pub fn remaining(&self) -> u64 {
        self.daily_budget.saturating_sub(self.used)
    }

    /// Whether less than 10% of the budget is left.
    pub fn is_low(&self) -> bool {
        if self.daily_budget == 0 {
            return true;
        }
        (self.remaining() as f64) < self.daily_budget as f64 * LOW_WATERMARK
    }

    /// Whether the budget is used up.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// When the current window ends.
    pub fn resets_at(&self) -> DateTime<Utc> {
        self.window_start + Duration::hours(WINDOW_HOURS)
    }

    /// Load a ledger from JSON, or start fresh if the file does not exist.
    ///
    /// The budget always comes from `daily_budget`, so a changed config
    /// takes effect without discarding the current count.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Usage`] if the file exists but is not a ledger.
    pub fn load_or_new(path: &Path, daily_budget: u64, now: DateTime<Utc>) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new(daily_budget, now));
        }
        let content = std::fs::read_to_string(path)?;
        let mut ledger: Self = serde_json::from_str(&content)
            .map_err(|e| HubError::Usage(format!("{}: {e}", path.display())))?;
        ledger.daily_budget = daily_budget;
        Ok(ledger)
    }

    /// Write the ledger as JSON, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|e| HubError::Usage(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Requests a query actually sent: one per category that answered or failed
/// on the wire. Disabled and skipped categories cost nothing.
pub fn units_for(results: &AggregatedResults) -> u64 {
    results
        .reports
        .iter()
        .filter(|report| report.was_requested())
        .count() as u64
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use chrono::TimeZone;
    use hub_search::{Category, SourceReport, SourceStatus};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn fresh_ledger_has_full_budget() {
        let ledger = UsageLedger::new(100, t0());
        assert_eq!(ledger.remaining(), 100);
        assert!(!ledger.is_low());
        assert!(!ledger.is_exhausted());
        assert_eq!(ledger.resets_at(), t0() + Duration::hours(24));
    }

    #[test]
    fn record_saturates() {
        let mut ledger = UsageLedger::new(10, t0());
        ledger.record(7);
        assert_eq!(ledger.remaining(), 3);
        ledger.record(u64::MAX);
        assert_eq!(ledger.remaining(), 0);
        assert!(ledger.is_exhausted());
    }

    #[test]
    fn low_watermark() {
        let mut ledger = UsageLedger::new(100, t0());
        ledger.record(90);
        assert!(!ledger.is_low());
        ledger.record(1);
        assert!(ledger.is_low());
        assert!(UsageLedger::new(0, t0()).is_low());
    }

    #[test]
    fn no_reset_within_window() {
        let mut ledger = UsageLedger::new(100, t0());
        ledger.record(40);
        assert!(!ledger.reset_if_elapsed(t0() + Duration::hours(23)));
        assert_eq!(ledger.used, 40);
    }

    #[test]
    fn reset_after_window() {
        let mut ledger = UsageLedger::new(100, t0());
        ledger.record(40);
        let later = t0() + Duration::hours(24);
        assert!(ledger.reset_if_elapsed(later));
        assert_eq!(ledger.used, 0);
        assert_eq!(ledger.window_start, later);
    }

    #[test]
    fn units_count_requested_categories() {
        let results = AggregatedResults {
            reports: vec![
                SourceReport {
                    category: Category::Video,
                    status: SourceStatus::Ok { count: 2 },
                },
                SourceReport {
                    category: Category::Article,
                    status: SourceStatus::Disabled,
                },
                SourceReport {
                    category: Category::Repo,
                    status: SourceStatus::Failed {
                        reason: "503".into(),
                    },
                },
                SourceReport {
                    category: Category::Article,
                    status: SourceStatus::Skipped {
                        reason: "config error: google_api_key is not set".into(),
                    },
                },
            ],
            ..Default::default()
        };
        assert_eq!(units_for(&results), 2);
        assert_eq!(units_for(&AggregatedResults::default()), 0);
    }

    #[test]
    fn save_and_load_keep_count_but_take_new_budget() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("usage.json");
        let mut ledger = UsageLedger::new(100, t0());
        ledger.record(12);
        ledger.save(&path).unwrap();

        let loaded = UsageLedger::load_or_new(&path, 250, t0()).unwrap();
        assert_eq!(loaded.used, 12);
        assert_eq!(loaded.daily_budget, 250);
        assert_eq!(loaded.window_start, t0());
    }

    #[test]
    fn load_missing_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = UsageLedger::load_or_new(&dir.path().join("none.json"), 5, t0()).unwrap();
        assert_eq!(ledger, UsageLedger::new(5, t0()));
    }

    #[test]
    fn load_garbage_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usage.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = UsageLedger::load_or_new(&path, 5, t0()).unwrap_err();
        assert!(matches!(err, HubError::Usage(_)));
    }
}
