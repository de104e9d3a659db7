//! Client-side dashboard filtering
//!
//! Filters apply to each dimension of a [`StatisticsSummary`] on its own.
//! The aggregate views are never re-joined against the underlying records,
//! so after filtering the per-dimension totals need not agree.

use serde::{Deserialize, Serialize};

use crate::stats::{MonthCount, StatisticsSummary};

/// Inclusive month bounds on `YYYY-MM` keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl MonthRange {
    pub fn is_set(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Whether `month` lies within the bounds
    ///
    /// Zero-padded `YYYY-MM` keys order lexicographically the same way they
    /// order chronologically.
    pub fn contains(&self, month: &str) -> bool {
        if let Some(start) = &self.start {
            if month < start.as_str() {
                return false;
            }
        }
        if let Some(end) = &self.end {
            if month > end.as_str() {
                return false;
            }
        }
        true
    }
}

/// Filter state of the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilter {
    /// Profession allow-set; empty keeps every profession
    pub professions: Vec<String>,
    /// Age bracket allow-set (labels); empty keeps every bracket
    pub age_ranges: Vec<String>,
    pub months: MonthRange,
    /// Carried and described, but not applied to any dimension
    pub search_term: String,
}

impl DashboardFilter {
    /// Whether any part of the filter is set
    pub fn is_active(&self) -> bool {
        !self.professions.is_empty()
            || !self.age_ranges.is_empty()
            || self.months.is_set()
            || !self.search_term.trim().is_empty()
    }

    /// Produce the filtered summary
    pub fn apply(&self, summary: &StatisticsSummary) -> StatisticsSummary {
        let profession_stats = if self.professions.is_empty() {
            summary.profession_stats.clone()
        } else {
            summary
                .profession_stats
                .iter()
                .filter(|p| self.professions.contains(&p.profession))
                .cloned()
                .collect()
        };

        let age_range_stats = if self.age_ranges.is_empty() {
            summary.age_range_stats.clone()
        } else {
            summary
                .age_range_stats
                .iter()
                .filter(|a| self.age_ranges.contains(&a.age_range))
                .cloned()
                .collect()
        };

        let monthly_stats: Vec<MonthCount> = summary
            .monthly_stats
            .iter()
            .filter(|m| self.months.contains(&m.month))
            .cloned()
            .collect();

        StatisticsSummary {
            profession_stats,
            age_range_stats,
            monthly_stats,
        }
    }

    /// One-line description of the active filter parts, joined by ` • `
    ///
    /// Empty when the filter is inactive.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();

        let search = self.search_term.trim();
        if !search.is_empty() {
            parts.push(format!("Search: \"{}\"", search));
        }

        match self.professions.as_slice() {
            [] => {}
            [single] => parts.push(format!("Profession: {}", single)),
            many => parts.push(format!("{} professions selected", many.len())),
        }

        match self.age_ranges.as_slice() {
            [] => {}
            [single] => parts.push(format!("Age: {} years", single)),
            many => parts.push(format!("{} age ranges selected", many.len())),
        }

        match (&self.months.start, &self.months.end) {
            (Some(start), Some(end)) => parts.push(format!("Period: {} - {}", start, end)),
            (Some(start), None) => parts.push(format!("From: {}", start)),
            (None, Some(end)) => parts.push(format!("Until: {}", end)),
            (None, None) => {}
        }

        parts.join(" • ")
    }
}

/// Values offered by the filter controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub professions: Vec<String>,
    pub age_ranges: Vec<String>,
    /// Sorted ascending
    pub months: Vec<String>,
}

impl FilterOptions {
    /// Collect the options from an unfiltered summary
    pub fn from_summary(summary: &StatisticsSummary) -> Self {
        let mut months: Vec<String> = summary
            .monthly_stats
            .iter()
            .map(|m| m.month.clone())
            .collect();
        months.sort();

        Self {
            professions: summary
                .profession_stats
                .iter()
                .map(|p| p.profession.clone())
                .collect(),
            age_ranges: summary
                .age_range_stats
                .iter()
                .map(|a| a.age_range.clone())
                .collect(),
            months,
        }
    }
}
