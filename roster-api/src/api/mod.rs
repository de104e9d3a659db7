//! HTTP API handlers for roster-api

pub mod health;
pub mod persons;
pub mod professions;
pub mod stats;

pub use health::health_routes;
pub use persons::{create_person, list_persons};
pub use professions::list_professions;
pub use stats::get_dashboard_stats;
