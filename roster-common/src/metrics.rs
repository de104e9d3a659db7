//! Derived summary metrics for the dashboard overview

use serde::Serialize;

use crate::stats::{AgeRangeCount, MonthCount, ProfessionCount, StatisticsSummary};

/// Headline numbers computed from a (possibly filtered) summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryMetrics {
    /// Sum of the profession counts
    pub total_persons: i64,
    pub distinct_professions: usize,
    pub age_ranges_present: usize,
    pub peak_month: Option<MonthCount>,
    pub top_profession: Option<ProfessionCount>,
    pub top_age_range: Option<AgeRangeCount>,
}

impl SummaryMetrics {
    pub fn compute(summary: &StatisticsSummary) -> Self {
        Self {
            total_persons: total_persons(summary),
            distinct_professions: summary.profession_stats.len(),
            age_ranges_present: summary.age_range_stats.len(),
            peak_month: arg_max(&summary.monthly_stats, |m| m.count).cloned(),
            top_profession: arg_max(&summary.profession_stats, |p| p.count).cloned(),
            top_age_range: arg_max(&summary.age_range_stats, |a| a.count).cloned(),
        }
    }
}

/// Total record count, taken from the profession dimension
pub fn total_persons(summary: &StatisticsSummary) -> i64 {
    summary.profession_stats.iter().map(|p| p.count).sum()
}

/// Entry with the highest count; the first one wins a tie
///
/// `Iterator::max_by_key` keeps the last maximum, so the scan is explicit.
pub fn arg_max<T>(items: &[T], count: impl Fn(&T) -> i64) -> Option<&T> {
    let mut best: Option<&T> = None;
    for item in items {
        match best {
            Some(current) if count(item) <= count(current) => {}
            _ => best = Some(item),
        }
    }
    best
}

/// Share of records hidden by a filter, in percent with one decimal
///
/// Returns `0.0` when `total` is zero.
pub fn reduction_percent(total: i64, filtered: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let pct = (total - filtered) as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(m: &str, count: i64) -> MonthCount {
        MonthCount {
            month: m.to_string(),
            count,
        }
    }

    fn profession(p: &str, count: i64) -> ProfessionCount {
        ProfessionCount {
            profession: p.to_string(),
            count,
        }
    }

    #[test]
    fn test_peak_month_first_of_ties() {
        let summary = StatisticsSummary {
            monthly_stats: vec![month("2024-01", 5), month("2024-02", 9), month("2024-03", 9)],
            ..Default::default()
        };
        let metrics = SummaryMetrics::compute(&summary);
        assert_eq!(metrics.peak_month, Some(month("2024-02", 9)));
    }

    #[test]
    fn test_top_profession_first_of_ties() {
        let summary = StatisticsSummary {
            profession_stats: vec![
                profession("Nurse", 3),
                profession("Doctor", 3),
                profession("Lawyer", 1),
            ],
            ..Default::default()
        };
        let metrics = SummaryMetrics::compute(&summary);
        assert_eq!(metrics.top_profession, Some(profession("Nurse", 3)));
        assert_eq!(metrics.total_persons, 7);
        assert_eq!(metrics.distinct_professions, 3);
    }

    #[test]
    fn test_top_age_range_later_strictly_greater_wins() {
        let summary = StatisticsSummary {
            age_range_stats: vec![
                AgeRangeCount { age_range: "0-18".to_string(), count: 2 },
                AgeRangeCount { age_range: "36-60".to_string(), count: 4 },
            ],
            ..Default::default()
        };
        let metrics = SummaryMetrics::compute(&summary);
        assert_eq!(metrics.top_age_range.unwrap().age_range, "36-60");
        assert_eq!(metrics.age_ranges_present, 2);
    }

    #[test]
    fn test_empty_summary_has_no_tops() {
        let metrics = SummaryMetrics::compute(&StatisticsSummary::default());
        assert_eq!(metrics.total_persons, 0);
        assert_eq!(metrics.peak_month, None);
        assert_eq!(metrics.top_profession, None);
        assert_eq!(metrics.top_age_range, None);
    }

    #[test]
    fn test_arg_max_single_item() {
        let items = [month("2023-12", 0)];
        assert_eq!(arg_max(&items, |m| m.count), Some(&items[0]));
    }

    #[test]
    fn test_reduction_percent() {
        assert_eq!(reduction_percent(0, 0), 0.0);
        assert_eq!(reduction_percent(10, 10), 0.0);
        assert_eq!(reduction_percent(10, 4), 60.0);
        assert_eq!(reduction_percent(3, 1), 66.7);
    }
}
