use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::aggregate::aggregate;
use crate::model::{BreakdownRow, DateRange, Record};
use crate::nav::Navigation;
use crate::view::rows;

/// Progress of the one-time load of the bug CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed(String),
}

pub struct TuiState {
    pub nav: Navigation,
    pub until: Option<DateTime<Utc>>,
    pub records: Vec<Record>,
    pub load_state: LoadState,
    pub rows: Vec<BreakdownRow>,
    pub total: u32,
    pub max_count: u32,
    pub selected: usize,
    pub filtered_indices: Vec<usize>,
    pub search_mode: bool,
    pub search_query: String,
    pub since_mode: bool,
    pub since_input: String,
    pub show_help: bool,
    pub status_message: Option<(String, Instant)>,
}

impl TuiState {
    pub fn new(nav: Navigation, until: Option<DateTime<Utc>>) -> Self {
        Self {
            nav,
            until,
            records: Vec::new(),
            load_state: LoadState::Pending,
            rows: Vec::new(),
            total: 0,
            max_count: 0,
            selected: 0,
            filtered_indices: Vec::new(),
            search_mode: false,
            search_query: String::new(),
            since_mode: false,
            since_input: String::new(),
            show_help: false,
            status_message: None,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            until: self.until,
            ..self.nav.range()
        }
    }

    /// Recompute the breakdown for the current path and threshold.
    /// `focus` names the child to select afterwards, if still present.
    pub fn refresh(&mut self, focus: Option<&str>) {
        let breakdown = aggregate(&self.records, self.nav.base_path(), &self.range());
        self.total = breakdown.total();
        self.max_count = breakdown.max_count();
        self.rows = rows(&breakdown);
        self.search_query.clear();
        self.filtered_indices = (0..self.rows.len()).collect();
        self.selected = focus
            .and_then(|name| self.rows.iter().position(|r| r.name == name))
            .unwrap_or(0);
    }

    /// The highlighted row, or `None` when the name filter hides it.
    pub fn selected_row(&self) -> Option<&BreakdownRow> {
        if !self.filtered_indices.contains(&self.selected) {
            return None;
        }
        self.rows.get(self.selected)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::parse_records;
    use pretty_assertions::assert_eq;

    fn loaded(lines: &str) -> TuiState {
        let mut state = TuiState::new(Navigation::new(), None);
        state.records = parse_records(lines).records;
        state.load_state = LoadState::Loaded;
        state.refresh(None);
        state
    }

    #[test]
    fn refresh_sorts_rows_and_resets_filter() {
        let state = loaded("a/b.ts,2020-01-01\na/c/d.ts,2020-01-02\ne.ts,2020-01-01\n");
        let names: Vec<_> = state.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "e.ts"]);
        assert_eq!(state.total, 3);
        assert_eq!(state.filtered_indices, vec![0, 1]);
    }

    #[test]
    fn refresh_keeps_focus_on_named_child() {
        let mut state = loaded("a/x.ts,2020-01-01\na/y.ts,2020-01-01\nb/z.ts,2020-01-01\n");
        state.refresh(Some("b"));
        assert_eq!(state.selected_row().map(|r| r.name.as_str()), Some("b"));
        state.refresh(Some("gone"));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn until_bound_combines_with_navigation_since() {
        let t = DateTime::parse_from_rfc3339("2020-01-01T12:00:00Z").unwrap().with_timezone(&Utc);
        let mut state = TuiState::new(Navigation::new().with_since(Some(t)), Some(t));
        state.records = parse_records("a.ts,2020-01-01T12:00:00Z\nb.ts,2020-01-02\n").records;
        state.refresh(None);
        assert_eq!(state.rows.len(), 1);
        assert_eq!(state.rows[0].name, "a.ts");
    }
}
