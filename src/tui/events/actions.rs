use super::super::input::{copy_to_clipboard, ensure_selection_in_filtered};
use super::super::state::TuiState;

/// Open the selected child when it is a directory.
pub(super) fn descend_selected(state: &mut TuiState) {
    let Some(row) = state.selected_row() else {
        return;
    };
    if !row.is_directory {
        return;
    }
    let name = row.name.clone();
    state.nav.descend(&name);
    state.refresh(None);
}

/// Go up one level and keep the directory we came from selected.
pub(super) fn ascend(state: &mut TuiState) {
    if let Some(left) = state.nav.ascend() {
        state.refresh(Some(&left));
    }
}

/// Copy the repository-relative path of the selected entry.
pub(super) fn copy_selected_path(state: &mut TuiState) {
    let Some(row) = state.selected_row() else {
        return;
    };
    let path = format!("{}{}", state.nav.base_path(), row.name);
    match copy_to_clipboard(&path) {
        Ok(_) => state.set_status(format!("Copied: {path}")),
        Err(err) => {
            log::warn!("{err}");
            state.set_status(format!("{err}"));
        }
    }
}

/// Move selection upward within the filtered entries.
pub(super) fn move_up(state: &mut TuiState) {
    if let Some(pos) = state
        .filtered_indices
        .iter()
        .position(|&i| i == state.selected)
    {
        if pos > 0 {
            state.selected = state.filtered_indices[pos - 1];
        }
    } else {
        ensure_selection_in_filtered(state);
    }
}

/// Move selection downward within the filtered entries.
pub(super) fn move_down(state: &mut TuiState) {
    if let Some(pos) = state
        .filtered_indices
        .iter()
        .position(|&i| i == state.selected)
    {
        if pos + 1 < state.filtered_indices.len() {
            state.selected = state.filtered_indices[pos + 1];
        }
    } else {
        ensure_selection_in_filtered(state);
    }
}

pub(super) fn jump_first(state: &mut TuiState) {
    if let Some(&first) = state.filtered_indices.first() {
        state.selected = first;
    }
}

pub(super) fn jump_last(state: &mut TuiState) {
    if let Some(&last) = state.filtered_indices.last() {
        state.selected = last;
    }
}
