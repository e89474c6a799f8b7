use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::cli::CommonArgs;
use crate::error::Result;
use crate::nav::Navigation;
use crate::records::{load_records, ParsedRecords};
use crate::util::resolve_range;

use super::events::{handle_key_events, handle_mouse_event};
use super::state::{LoadState, TuiState};
use super::views::{draw_browser_view, draw_help_overlay};

const STATUS_TTL: Duration = Duration::from_secs(4);

/// Load the bug CSV off the UI thread; the receiver yields exactly one result.
fn spawn_loader(path: PathBuf) -> Receiver<Result<ParsedRecords>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(load_records(&path));
    });
    rx
}

/// Move a finished load into the state. Failures are logged once and leave an empty store.
pub fn apply_load_result(state: &mut TuiState, result: Result<ParsedRecords>) {
    match result {
        Ok(parsed) => {
            if parsed.skipped > 0 {
                state.set_status(format!("{} malformed lines skipped", parsed.skipped));
            }
            state.records = parsed.records;
            state.load_state = LoadState::Loaded;
        }
        Err(e) => {
            log::error!("Error loading bug data: {e}");
            state.records.clear();
            state.load_state = LoadState::Failed(e.to_string());
        }
    }
    state.refresh(None);
}

fn poll_loader(state: &mut TuiState, rx: &Receiver<Result<ParsedRecords>>) {
    if state.load_state != LoadState::Pending {
        return;
    }
    match rx.try_recv() {
        Ok(result) => apply_load_result(state, result),
        Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Disconnected) => {
            log::error!("bug data loader stopped without a result");
            state.load_state = LoadState::Failed("loader stopped".to_string());
            state.refresh(None);
        }
    }
}

pub fn run(common: &CommonArgs, path: Option<String>) -> io::Result<()> {
    let range = resolve_range(common.since.as_deref(), common.until.as_deref())
        .map_err(io::Error::other)?;
    let nav = Navigation::at(path.as_deref().unwrap_or("")).with_since(range.since);
    let mut state = TuiState::new(nav, range.until);
    let rx = spawn_loader(common.data.clone());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut state, &rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Some(report) = load_failure_report(&state) {
        eprintln!("{report}");
    }

    result
}

/// Message repeated on stderr once the terminal is restored, since the
/// status line that showed it is gone.
fn load_failure_report(state: &TuiState) -> Option<String> {
    match &state.load_state {
        LoadState::Failed(reason) => Some(format!("Error loading bug data: {reason}")),
        _ => None,
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut TuiState,
    rx: &Receiver<Result<ParsedRecords>>,
) -> io::Result<()> {
    loop {
        poll_loader(state, rx);

        if let Some((_, at)) = &state.status_message {
            if at.elapsed() > STATUS_TTL {
                state.status_message = None;
            }
        }

        terminal.draw(|f| {
            let size = f.size();
            draw_browser_view(f, size, state);
            if state.show_help {
                draw_help_overlay(f, size);
            }
        })?;

        if poll(Duration::from_millis(200))? {
            match read()? {
                Event::Key(key_event) => {
                    if handle_key_events(key_event, state) {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => handle_mouse_event(mouse_event, state),
                _ => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BugmapError;
    use crate::records::parse_records;

    #[test]
    fn failed_load_falls_back_to_an_empty_store() {
        let mut state = TuiState::new(Navigation::new(), None);
        let err = BugmapError::Io(io::Error::new(io::ErrorKind::NotFound, "bugs.csv"));
        apply_load_result(&mut state, Err(err));
        assert!(matches!(state.load_state, LoadState::Failed(_)));
        assert!(state.rows.is_empty());
        let report = load_failure_report(&state).unwrap();
        assert!(report.starts_with("Error loading bug data:"));
        assert!(report.contains("bugs.csv"));
    }

    #[test]
    fn successful_load_populates_rows() {
        let mut state = TuiState::new(Navigation::new(), None);
        apply_load_result(&mut state, Ok(parse_records("a/b.rs,2020-01-01\nbroken\n")));
        assert_eq!(state.load_state, LoadState::Loaded);
        assert_eq!(load_failure_report(&state), None);
        assert_eq!(state.rows.len(), 1);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn loader_thread_delivers_one_result() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bugs.csv");
        std::fs::write(&file, "src/a.rs,2020-01-01\n").unwrap();

        let mut state = TuiState::new(Navigation::new(), None);
        let rx = spawn_loader(file);
        let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        apply_load_result(&mut state, result);
        assert_eq!(state.rows[0].name, "src");
    }
}
