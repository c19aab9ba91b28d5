//! Search orchestrator: concurrent source queries and the combined view.
//!
//! This module fans a query out to the enabled sources concurrently,
//! downgrades any source failure to an empty sequence with a report, and
//! interleaves the per-category results into one combined ordering.

pub mod interleave;
pub mod search;
