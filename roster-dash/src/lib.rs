//! roster-dash library - statistics dashboard client
//!
//! Fetches the statistics summary from roster-api once, then filters and
//! summarizes it locally. Re-filtering never goes back to the network.

pub mod client;
pub mod dashboard;
pub mod notify;
pub mod render;

pub use client::{ClientError, RosterClient, StatsSource};
pub use dashboard::{Dashboard, DashboardView};
pub use notify::{Notification, NotificationLevel, Notifier};
