//! Database access layer for roster-api
//!
//! Parameterized queries against the `persons` table. Every function runs
//! its statements directly on the pool; none of them opens a transaction.

mod persons;
mod stats;

pub use persons::{insert_person, list_persons};
pub use stats::{age_range_stats, monthly_stats, profession_stats, statistics_summary};
