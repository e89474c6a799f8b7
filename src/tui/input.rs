use super::TuiState;
use crate::error::{BugmapError, Result};

pub fn apply_search_filter(state: &mut TuiState) {
    if state.search_query.is_empty() {
        state.filtered_indices = (0..state.rows.len()).collect();
    } else {
        let query = state.search_query.to_lowercase();
        state.filtered_indices = state
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.name.to_lowercase().contains(&query))
            .map(|(i, _)| i)
            .collect();
    }

    ensure_selection_in_filtered(state);
}

pub fn ensure_selection_in_filtered(state: &mut TuiState) {
    if state.filtered_indices.is_empty() {
        return;
    }

    if !state.filtered_indices.contains(&state.selected) {
        state.selected = state.filtered_indices[0];
    }
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| BugmapError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| BugmapError::Clipboard(e.to_string()))
}
