//! Keyboard input handling for the TUI.
//!
//! Translates key events into `App` calls. Overlays (help, delete
//! confirmation, editors, search) take every key while they are open.

use caseload_core::{RosterIntent, SortField};
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, CycleDirection, PAGE_SCROLL_SIZE};

/// Handle a key press.
pub fn handle_input(app: &mut App, key: KeyEvent) {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
        }
        AppState::ConfirmingDelete => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        },
        AppState::Searching => handle_search_input(app, key),
        AppState::EditingUnits | AppState::EditingMonths => handle_edit_input(app, key),
        AppState::Normal => handle_normal_input(app, key),
        AppState::Quitting => {}
    }
}

fn handle_normal_input(app: &mut App, key: KeyEvent) {
    // Any key dismisses the last status message
    app.status_message = None;

    if let Some(field) = sort_field_for(key.code) {
        app.toggle_sort(field);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Esc => {
            if !app.query.search.is_empty() {
                app.clear_search();
            }
        }

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(1),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(1),
        KeyCode::PageUp => app.select_prev(PAGE_SCROLL_SIZE),
        KeyCode::PageDown => app.select_next(PAGE_SCROLL_SIZE),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Editing
        KeyCode::Char('e') | KeyCode::Enter => app.start_units_edit(),
        KeyCode::Char('M') => app.start_months_edit(),
        KeyCode::Char('s') => app.switch_units_mode(),
        KeyCode::Char(']') => app.cycle_status(CycleDirection::Forward),
        KeyCode::Char('[') => app.cycle_status(CycleDirection::Backward),
        KeyCode::Char('a') => app.dispatch(RosterIntent::AddClient),
        KeyCode::Char('x') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('i') => app.dispatch(RosterIntent::ImportRequested),
        KeyCode::Char('o') => app.dispatch(RosterIntent::ExportRequested),
        _ => {}
    }
}

/// Column sort keys.
fn sort_field_for(code: KeyCode) -> Option<SortField> {
    match code {
        KeyCode::Char('n') => Some(SortField::Name),
        KeyCode::Char('c') => Some(SortField::Clinician),
        KeyCode::Char('d') => Some(SortField::AssignedDate),
        KeyCode::Char('u') => Some(SortField::UnitsUsed),
        KeyCode::Char('m') => Some(SortField::UnitsMode),
        KeyCode::Char('t') => Some(SortField::Status),
        KeyCode::Char('l') => Some(SortField::LastUpdated),
        _ => None,
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter | KeyCode::Up | KeyCode::Down => {
            // Keep the filter, return to the list
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_edit_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Backspace => app.pop_input_char(),
        KeyCode::Char(c) => app.push_input_char(c),
        _ => {}
    }
}
