//! Dashboard session state
//!
//! Holds the last fetched summary and the current filter. Only [`Dashboard::load`]
//! and [`Dashboard::refresh`] touch the network; everything else works on the
//! summary already in hand.

use roster_common::filter::FilterOptions;
use roster_common::metrics::{self, SummaryMetrics};
use roster_common::{DashboardFilter, StatisticsSummary};
use serde::Serialize;
use tracing::{debug, warn};

use crate::client::{ClientError, StatsSource};
use crate::notify::{Notification, Notifier};

/// Message shown after a successful refresh
pub const REFRESH_SUCCESS_MESSAGE: &str = "Data refreshed successfully";

/// Everything the dashboard displays for the current filter
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Summary after filtering
    pub summary: StatisticsSummary,
    pub metrics: SummaryMetrics,
    /// Selectable values, from the unfiltered summary
    pub options: FilterOptions,
    pub filter_active: bool,
    /// Empty when no filter is active
    pub description: String,
    /// Record count before filtering
    pub total_persons: i64,
    /// Record count after filtering
    pub filtered_persons: i64,
    pub reduction_percent: f64,
}

pub struct Dashboard<S> {
    source: S,
    summary: Option<StatisticsSummary>,
    filter: DashboardFilter,
    last_error: Option<String>,
}

impl<S: StatsSource> Dashboard<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            summary: None,
            filter: DashboardFilter::default(),
            last_error: None,
        }
    }

    /// Initial fetch
    ///
    /// Failures are returned, not notified; the caller decides whether to
    /// retry.
    pub async fn load(&mut self) -> Result<&StatisticsSummary, ClientError> {
        match self.source.fetch_summary().await {
            Ok(summary) => {
                self.last_error = None;
                let summary: &StatisticsSummary = self.summary.insert(summary);
                Ok(summary)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch again and replace the summary wholesale
    ///
    /// On failure the previous summary stays in place. Either outcome is
    /// reported through `notifier`.
    pub async fn refresh(&mut self, notifier: &dyn Notifier) -> Result<(), ClientError> {
        match self.source.fetch_summary().await {
            Ok(summary) => {
                debug!(
                    professions = summary.profession_stats.len(),
                    months = summary.monthly_stats.len(),
                    "Dashboard refreshed"
                );
                self.summary = Some(summary);
                self.last_error = None;
                notifier.notify(Notification::success(REFRESH_SUCCESS_MESSAGE));
                Ok(())
            }
            Err(e) => {
                warn!("Dashboard refresh failed: {}", e);
                let message = e.to_string();
                self.last_error = Some(message.clone());
                notifier.notify(Notification::error(message));
                Err(e)
            }
        }
    }

    pub fn set_filter(&mut self, filter: DashboardFilter) {
        self.filter = filter;
    }

    pub fn clear_filters(&mut self) {
        self.filter = DashboardFilter::default();
    }

    pub fn filter(&self) -> &DashboardFilter {
        &self.filter
    }

    /// Last fetched summary, unfiltered
    pub fn summary(&self) -> Option<&StatisticsSummary> {
        self.summary.as_ref()
    }

    /// Message of the most recent failed fetch, cleared by a successful one
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Current view, `None` until a summary has been loaded
    pub fn view(&self) -> Option<DashboardView> {
        let full = self.summary.as_ref()?;
        let filtered = self.filter.apply(full);

        let total_persons = metrics::total_persons(full);
        let filtered_persons = metrics::total_persons(&filtered);

        Some(DashboardView {
            metrics: SummaryMetrics::compute(&filtered),
            options: FilterOptions::from_summary(full),
            filter_active: self.filter.is_active(),
            description: self.filter.describe(),
            total_persons,
            filtered_persons,
            reduction_percent: metrics::reduction_percent(total_persons, filtered_persons),
            summary: filtered,
        })
    }
}
