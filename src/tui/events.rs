use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

use super::state::TuiState;

mod actions;
mod input_modes;

use actions::*;
use input_modes::*;

/// Handle a keyboard event, mutating TUI state and returning `true` if the loop should exit.
pub fn handle_key_events(key_event: KeyEvent, state: &mut TuiState) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if state.show_help {
        if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1)) {
            state.show_help = false;
        }
        return false;
    }

    if state.search_mode {
        handle_search_input(key_event.code, state);
        return false;
    }

    if state.since_mode {
        handle_since_input(key_event.code, state);
        return false;
    }

    match key_event.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Char('/') => {
            state.search_mode = true;
            state.search_query.clear();
        }
        KeyCode::Char('s') => {
            state.since_mode = true;
            state.since_input = state
                .nav
                .since()
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
        }
        KeyCode::Char('c') => copy_selected_path(state),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => descend_selected(state),
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => ascend(state),
        KeyCode::Up | KeyCode::Char('k') => move_up(state),
        KeyCode::Down | KeyCode::Char('j') => move_down(state),
        KeyCode::Char('g') | KeyCode::Home => jump_first(state),
        KeyCode::Char('G') | KeyCode::End => jump_last(state),
        KeyCode::PageUp => {
            for _ in 0..10 {
                move_up(state);
            }
        }
        KeyCode::PageDown => {
            for _ in 0..10 {
                move_down(state);
            }
        }
        _ => {}
    }

    false
}

/// Mouse wheel scrolls the selection.
pub fn handle_mouse_event(mouse_event: MouseEvent, state: &mut TuiState) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => move_up(state),
        MouseEventKind::ScrollDown => move_down(state),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::Navigation;
    use crate::records::parse_records;
    use crate::tui::state::LoadState;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn press(state: &mut TuiState, code: KeyCode) -> bool {
        handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), state)
    }

    fn type_text(state: &mut TuiState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn loaded() -> TuiState {
        let mut state = TuiState::new(Navigation::new(), None);
        state.records = parse_records(
            "src/ui/app.rs,2020-01-01\n\
             src/ui/app.rs,2020-03-01\n\
             src/main.rs,2020-03-01\n\
             README.md,2020-01-01\n",
        )
        .records;
        state.load_state = LoadState::Loaded;
        state.refresh(None);
        state
    }

    fn names(state: &TuiState) -> Vec<&str> {
        state.rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn enter_descends_and_backspace_returns_to_the_same_child() {
        let mut state = loaded();
        assert_eq!(names(&state), vec!["src", "README.md"]);

        press(&mut state, KeyCode::Enter);
        assert_eq!(state.nav.base_path(), "src/");
        assert_eq!(names(&state), vec!["ui", "main.rs"]);

        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.nav.base_path(), "");
        assert_eq!(state.selected_row().map(|r| r.name.as_str()), Some("src"));
    }

    #[test]
    fn files_cannot_be_entered() {
        let mut state = loaded();
        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.nav.base_path(), "");
    }

    #[test]
    fn backspace_at_root_is_a_no_op() {
        let mut state = loaded();
        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.nav.base_path(), "");
        assert_eq!(names(&state), vec!["src", "README.md"]);
    }

    #[test]
    fn since_input_filters_and_clears() {
        let mut state = loaded();
        press(&mut state, KeyCode::Char('s'));
        type_text(&mut state, "2020-02-01");
        press(&mut state, KeyCode::Enter);
        assert!(!state.since_mode);
        assert_eq!(names(&state), vec!["src"]);
        assert_eq!(state.total, 2);

        press(&mut state, KeyCode::Char('s'));
        for _ in 0..10 {
            press(&mut state, KeyCode::Backspace);
        }
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.nav.since(), None);
        assert_eq!(state.total, 4);
    }

    #[test]
    fn invalid_since_keeps_the_old_threshold() {
        let mut state = loaded();
        press(&mut state, KeyCode::Char('s'));
        type_text(&mut state, "whenever");
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.nav.since(), None);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn search_mode_swallows_navigation_keys() {
        let mut state = loaded();
        press(&mut state, KeyCode::Char('/'));
        type_text(&mut state, "read");
        assert_eq!(state.filtered_indices, vec![1]);
        assert_eq!(state.selected, 1);
        assert!(!press(&mut state, KeyCode::Char('q')));
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.filtered_indices, vec![0, 1]);
        assert!(press(&mut state, KeyCode::Char('q')));
    }

    #[test]
    fn enter_with_no_visible_rows_stays_put() {
        let mut state = loaded();
        press(&mut state, KeyCode::Char('/'));
        type_text(&mut state, "xq");
        press(&mut state, KeyCode::Enter);
        assert!(state.filtered_indices.is_empty());
        assert_eq!(state.selected_row(), None);

        press(&mut state, KeyCode::Enter);
        assert_eq!(state.nav.base_path(), "");
        assert_eq!(names(&state), vec!["src", "README.md"]);
    }

    #[test]
    fn help_overlay_toggles() {
        let mut state = loaded();
        press(&mut state, KeyCode::Char('?'));
        assert!(state.show_help);
        press(&mut state, KeyCode::Char('j'));
        assert_eq!(state.selected, 0);
        press(&mut state, KeyCode::Esc);
        assert!(!state.show_help);
    }
}
