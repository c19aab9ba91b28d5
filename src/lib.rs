//! ResourceHub: learning-resource discovery.
//!
//! This crate is the host around [`hub_search`]. It owns everything the
//! search core deliberately does not:
//!
//! - **Configuration**: a TOML file plus environment overrides for API keys
//! - **Usage accounting**: a [`UsageLedger`] value threaded through each query
//! - **Paths**: platform-appropriate config and data directories
//!
//! The command-line front end lives in `src/bin/cli.rs`.

pub mod config;
pub mod error;
pub mod hub_dirs;
pub mod usage;

pub use config::HubConfig;
pub use error::{HubError, Result};
pub use usage::UsageLedger;

use chrono::{DateTime, Utc};
use hub_search::{AggregatedResults, EnabledCategories, SearchConfig, SearchQuery};

/// Run one search and charge it to `ledger`.
///
/// The ledger's window is rolled over first if it has expired at `now`. The
/// updated ledger is returned alongside the results; nothing is persisted.
pub async fn run_query(
    query: &SearchQuery,
    enabled: EnabledCategories,
    config: &SearchConfig,
    mut ledger: UsageLedger,
    now: DateTime<Utc>,
) -> (AggregatedResults, UsageLedger) {
    if ledger.reset_if_elapsed(now) {
        tracing::info!("usage window rolled over");
    }

    let results = hub_search::search(query, enabled, config).await;
    ledger.record(usage::units_for(&results));

    if ledger.is_low() {
        tracing::warn!(
            remaining = ledger.remaining(),
            budget = ledger.daily_budget,
            "daily request budget running low"
        );
    }

    (results, ledger)
}
