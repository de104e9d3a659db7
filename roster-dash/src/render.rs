//! Plain-text rendering for the terminal

use roster_common::PersonRecord;
use std::fmt::Write;

use crate::dashboard::DashboardView;

const BAR_WIDTH: i64 = 30;

fn bar(count: i64, max: i64) -> String {
    if max <= 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH + max - 1) / max;
    "#".repeat(len.max(0) as usize)
}

fn section(out: &mut String, title: &str, rows: &[(String, i64)]) {
    let _ = writeln!(out, "\n{}", title);
    if rows.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return;
    }
    let max = rows.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    for (key, count) in rows {
        let _ = writeln!(out, "  {:<width$}  {:>5}  {}", key, count, bar(*count, max));
    }
}

/// Render the dashboard overview and the three charts
pub fn render_view(view: &DashboardView) -> String {
    let mut out = String::new();
    let m = &view.metrics;

    let _ = writeln!(out, "Registration statistics");
    if view.filter_active {
        let _ = writeln!(out, "Filters: {}", view.description);
        let _ = writeln!(
            out,
            "Showing {} of {} persons ({}% filtered out)",
            view.filtered_persons, view.total_persons, view.reduction_percent
        );
    }

    let _ = writeln!(out, "\nTotal persons:     {}", m.total_persons);
    let _ = writeln!(out, "Professions:       {}", m.distinct_professions);
    let _ = writeln!(out, "Age ranges:        {}", m.age_ranges_present);
    if let Some(top) = &m.top_profession {
        let _ = writeln!(out, "Top profession:    {} ({})", top.profession, top.count);
    }
    if let Some(top) = &m.top_age_range {
        let _ = writeln!(out, "Top age range:     {} years ({})", top.age_range, top.count);
    }
    if let Some(peak) = &m.peak_month {
        let _ = writeln!(out, "Peak month:        {} ({})", peak.month, peak.count);
    }

    let summary = &view.summary;
    section(
        &mut out,
        "By profession",
        &summary
            .profession_stats
            .iter()
            .map(|p| (p.profession.clone(), p.count))
            .collect::<Vec<_>>(),
    );
    section(
        &mut out,
        "By age range",
        &summary
            .age_range_stats
            .iter()
            .map(|a| (a.age_range.clone(), a.count))
            .collect::<Vec<_>>(),
    );
    section(
        &mut out,
        "By registration month",
        &summary
            .monthly_stats
            .iter()
            .map(|mc| (mc.month.clone(), mc.count))
            .collect::<Vec<_>>(),
    );

    out
}

/// One line per person, in the order given
pub fn render_persons(persons: &[PersonRecord]) -> String {
    let mut out = String::new();
    if persons.is_empty() {
        let _ = writeln!(out, "No persons registered");
        return out;
    }
    for p in persons {
        let _ = writeln!(
            out,
            "{:>5}  {} {}  ({}, {})  {}  {}  registered {}",
            p.id,
            p.first_name,
            p.last_name,
            p.age,
            p.profession,
            p.phone,
            p.address,
            p.created_at.format("%Y-%m-%d")
        );
    }
    out
}

pub fn render_professions(professions: &[String]) -> String {
    professions.iter().map(|p| format!("{}\n", p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_to_max() {
        assert_eq!(bar(10, 10).len(), 30);
        assert_eq!(bar(5, 10).len(), 15);
        assert_eq!(bar(1, 100).len(), 1);
        assert_eq!(bar(0, 10), "");
        assert_eq!(bar(3, 0), "");
    }

    #[test]
    fn test_render_professions() {
        let text = render_professions(&["Nurse".to_string(), "Chef".to_string()]);
        assert_eq!(text, "Nurse\nChef\n");
    }

    #[test]
    fn test_render_empty_persons() {
        assert_eq!(render_persons(&[]), "No persons registered\n");
    }
}
