//! Display-only values derived from a breakdown: row ordering, shares and
//! heat buckets. Shared by the table output and the terminal UI.

use crate::model::{Breakdown, BreakdownRow};

const LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatLevel {
    Minimal,
    Low,
    Medium,
    High,
    Critical,
}

pub fn rows(breakdown: &Breakdown) -> Vec<BreakdownRow> {
    let total = breakdown.total();
    breakdown
        .sorted()
        .into_iter()
        .map(|(name, entry)| BreakdownRow {
            name: name.to_string(),
            count: entry.count,
            is_directory: entry.is_directory,
            share: share(entry.count, total),
        })
        .collect()
}

pub fn share(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

pub fn heat_level(count: u32, max: u32) -> HeatLevel {
    if max == 0 {
        return HeatLevel::Minimal;
    }

    let ratio = count as f64 / max as f64;
    if ratio > 0.8 {
        HeatLevel::Critical
    } else if ratio > 0.6 {
        HeatLevel::High
    } else if ratio > 0.4 {
        HeatLevel::Medium
    } else if ratio > 0.2 {
        HeatLevel::Low
    } else {
        HeatLevel::Minimal
    }
}

/// Fixed-width bar: filled cells scale with `count/max`, the glyph with intensity.
pub fn intensity_bar(count: u32, max: u32, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (count as f64 / max as f64).min(1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let intensity_idx =
        ((ratio * (LEVELS.len() - 1) as f64).round() as usize).min(LEVELS.len() - 1);

    LEVELS[intensity_idx].repeat(filled) + &"░".repeat(width - filled)
}

pub fn entry_icon(is_directory: bool) -> &'static str {
    if is_directory {
        "📁"
    } else {
        "📄"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChildEntry;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn breakdown(pairs: &[(&str, u32, bool)]) -> Breakdown {
        let entries: HashMap<_, _> = pairs
            .iter()
            .map(|(name, count, is_directory)| {
                (name.to_string(), ChildEntry { count: *count, is_directory: *is_directory })
            })
            .collect();
        Breakdown::new("", entries)
    }

    #[test]
    fn rows_sort_by_count_then_name() {
        let rows = rows(&breakdown(&[("b", 2, false), ("a", 2, true), ("c", 4, true)]));
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(rows[0].share, 50.0);
        assert_eq!(rows[1].share, 25.0);
    }

    #[test]
    fn empty_breakdown_has_no_rows() {
        assert!(rows(&Breakdown::default()).is_empty());
        assert_eq!(share(0, 0), 0.0);
    }

    #[test]
    fn heat_levels_follow_ratio_buckets() {
        assert_eq!(heat_level(10, 10), HeatLevel::Critical);
        assert_eq!(heat_level(7, 10), HeatLevel::High);
        assert_eq!(heat_level(5, 10), HeatLevel::Medium);
        assert_eq!(heat_level(3, 10), HeatLevel::Low);
        assert_eq!(heat_level(2, 10), HeatLevel::Minimal);
        assert_eq!(heat_level(0, 0), HeatLevel::Minimal);
    }

    #[test]
    fn intensity_bar_keeps_its_width() {
        assert_eq!(intensity_bar(0, 0, 4), "░░░░");
        assert_eq!(intensity_bar(10, 10, 4), "████");
        assert_eq!(intensity_bar(5, 10, 4).chars().count(), 4);
        assert_eq!(intensity_bar(0, 10, 3), "░░░");
    }
}
