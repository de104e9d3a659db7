//! # Roster Common Library
//!
//! Shared code for the roster services including:
//! - Person record model, input validation, and the age rule
//! - Statistics summary types and age bracket classification
//! - Client-side dashboard filtering and derived metrics
//! - Configuration loading and root folder resolution
//! - Store initialization (behind the `sqlx` feature)

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod person;
pub mod stats;
pub mod time;

pub use error::{Error, Result};
pub use filter::{DashboardFilter, MonthRange};
pub use person::{NewPerson, PersonInput, PersonRecord};
pub use stats::{AgeBracket, StatisticsSummary};
