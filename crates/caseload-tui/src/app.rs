//! Application state for the caseload roster.
//!
//! `App` holds the UI state (search, sort, selection, edit buffers) and the
//! `RosterStore` that owns the client list. Every edit is expressed as a
//! `RosterIntent` and routed through [`App::dispatch`].

use std::path::PathBuf;

use caseload_core::{
    Client, ClientId, RosterIntent, RosterQuery, RosterRow, RosterSummary, SortField, UnitsChange,
};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::store::{Applied, RosterStore};

// ============================================================================
// Constants
// ============================================================================

/// Number of rows to move on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Maximum length for the search box.
const MAX_SEARCH_LENGTH: usize = 64;

/// Maximum length for a units or months entry.
const MAX_NUMBER_LENGTH: usize = 8;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    EditingUnits,
    EditingMonths,
    ConfirmingDelete,
    ShowingHelp,
    Quitting,
}

/// Direction for stepping through statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Forward,
    Backward,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub config: Config,
    /// Where sort preferences are saved. `None` disables saving.
    config_path: Option<PathBuf>,
    pub store: RosterStore,

    pub state: AppState,
    pub query: RosterQuery,
    pub selection: usize,
    pub input_buffer: String,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Config, config_path: Option<PathBuf>, store: RosterStore) -> Self {
        let query = RosterQuery::new(String::new(), config.sort_state());
        Self {
            config,
            config_path,
            store,
            state: AppState::Normal,
            query,
            selection: 0,
            input_buffer: String::new(),
            status_message: None,
        }
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// Rows for the current search and sort.
    pub fn rows(&self) -> Vec<RosterRow<'_>> {
        self.query.rows(self.store.clients())
    }

    pub fn summary(&self) -> RosterSummary {
        RosterSummary::from_rows(&self.rows(), self.store.clients().len())
    }

    pub fn selected_client(&self) -> Option<&Client> {
        self.rows().get(self.selection).map(|row| row.client)
    }

    fn selected_id(&self) -> Option<ClientId> {
        self.selected_client().map(|c| c.id.clone())
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn select_next(&mut self, step: usize) {
        let len = self.rows().len();
        if len > 0 {
            self.selection = (self.selection + step).min(len - 1);
        }
    }

    pub fn select_prev(&mut self, step: usize) {
        self.selection = self.selection.saturating_sub(step);
    }

    pub fn select_first(&mut self) {
        self.selection = 0;
    }

    pub fn select_last(&mut self) {
        self.selection = self.rows().len().saturating_sub(1);
    }

    /// Move the selection to `id` if it is visible under the current search.
    fn select_id(&mut self, id: &ClientId) {
        if let Some(pos) = self.rows().iter().position(|r| &r.client.id == id) {
            self.selection = pos;
        }
    }

    /// Keep the selection inside the visible rows after the list shrinks.
    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if self.selection >= len {
            self.selection = len.saturating_sub(1);
        }
    }

    // =========================================================================
    // Search
    // =========================================================================

    pub fn start_search(&mut self) {
        self.state = AppState::Searching;
    }

    pub fn push_search_char(&mut self, c: char) {
        if can_add_search_char(self.query.search.chars().count(), c) {
            self.query.search.push(c);
            self.selection = 0;
        }
    }

    pub fn pop_search_char(&mut self) {
        self.query.search.pop();
        self.selection = 0;
    }

    pub fn clear_search(&mut self) {
        self.query.search.clear();
        self.selection = 0;
        self.state = AppState::Normal;
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Toggle sort column - if already sorting by this column, flip direction;
    /// otherwise switch to this column ascending. Resets selection to 0.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.query.sort.toggle(field);
        self.selection = 0;

        if self.config.remember_sort(self.query.sort) {
            if let Some(ref path) = self.config_path {
                if let Err(e) = self.config.save_to(path) {
                    warn!(error = %e, "Failed to save sort preference");
                }
            }
        }
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Open the units editor for the selected client.
    pub fn start_units_edit(&mut self) {
        if let Some(client) = self.selected_client() {
            self.input_buffer = format_number(client.units_used);
            self.state = AppState::EditingUnits;
        }
    }

    /// Open the months editor. Only monthly clients have months to edit.
    pub fn start_months_edit(&mut self) {
        let months = self.selected_client().and_then(|c| c.months_assigned());
        match months {
            Some(months) => {
                self.input_buffer = months.to_string();
                self.state = AppState::EditingMonths;
            }
            None if self.selected_client().is_some() => {
                self.status_message = Some("Months apply to monthly clients only".to_string());
            }
            None => {}
        }
    }

    pub fn push_input_char(&mut self, c: char) {
        if can_add_number_char(self.input_buffer.len(), c) {
            self.input_buffer.push(c);
        }
    }

    pub fn pop_input_char(&mut self) {
        self.input_buffer.pop();
    }

    pub fn cancel_edit(&mut self) {
        self.input_buffer.clear();
        self.state = AppState::Normal;
    }

    /// Normalize the edit buffer into a units change and apply it.
    pub fn commit_edit(&mut self) {
        let change = self.selected_client().and_then(|client| match self.state {
            AppState::EditingUnits => Some(UnitsChange::edit_units(client, &self.input_buffer)),
            AppState::EditingMonths => UnitsChange::edit_months(client, &self.input_buffer),
            _ => None,
        });

        self.input_buffer.clear();
        self.state = AppState::Normal;

        if let Some(change) = change {
            self.dispatch(RosterIntent::ChangeUnits(change));
        }
    }

    /// Flip the selected client between annual and monthly.
    pub fn switch_units_mode(&mut self) {
        let change = self
            .selected_client()
            .map(|client| UnitsChange::switch_mode(client, client.units_mode().toggled()));
        if let Some(change) = change {
            self.dispatch(RosterIntent::ChangeUnits(change));
        }
    }

    pub fn cycle_status(&mut self, direction: CycleDirection) {
        let intent = self.selected_client().map(|client| {
            let status = match direction {
                CycleDirection::Forward => client.status.next(),
                CycleDirection::Backward => client.status.prev(),
            };
            RosterIntent::change_status(client.id.clone(), status)
        });
        if let Some(intent) = intent {
            self.dispatch(intent);
        }
    }

    pub fn request_delete(&mut self) {
        if self.selected_client().is_some() {
            self.state = AppState::ConfirmingDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.state = AppState::Normal;
        if let Some(id) = self.selected_id() {
            self.dispatch(RosterIntent::delete(id));
        }
    }

    // =========================================================================
    // Intent dispatch
    // =========================================================================

    /// Hand an intent to the store and report the outcome in the status bar.
    pub fn dispatch(&mut self, intent: RosterIntent) {
        let description = intent.describe();
        match self.store.apply(intent) {
            Ok(Applied::Updated(id)) => {
                // An edit can move the client under the active sort
                self.select_id(&id);
                self.status_message = Some(match self.store.get(&id) {
                    Some(client) => format!("{}: {}", client.name, description),
                    None => description,
                });
            }
            Ok(Applied::Added(id)) => {
                self.select_id(&id);
                self.status_message = Some(description);
            }
            Ok(Applied::Removed(_)) => {
                self.status_message = Some(description);
            }
            Ok(Applied::Imported(count)) => {
                self.selection = 0;
                self.status_message = Some(format!(
                    "Imported {} clients from {}",
                    count,
                    self.store.path().display()
                ));
            }
            Ok(Applied::Exported(count)) => {
                self.status_message = Some(format!(
                    "Exported {} clients to {}",
                    count,
                    self.store.path().display()
                ));
            }
            Ok(Applied::Missing(id)) => {
                self.status_message = Some(format!("Client {} is no longer on the roster", id));
            }
            Err(e) => {
                error!(error = %e, "Roster intent failed");
                self.status_message = Some(format!("Error: {:#}", e));
            }
        }
        self.clamp_selection();
    }

    pub fn quit(&mut self) {
        info!("Quit requested");
        self.state = AppState::Quitting;
    }
}

/// Units shown in the editor: whole numbers without a decimal point,
/// fractional hours to one place.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a search character should be accepted
pub fn can_add_search_char(current_len: usize, c: char) -> bool {
    current_len < MAX_SEARCH_LENGTH && !c.is_control()
}

/// Check if a character belongs in a units/months entry
pub fn can_add_number_char(current_len: usize, c: char) -> bool {
    current_len < MAX_NUMBER_LENGTH && (c.is_ascii_digit() || c == '.' || c == '-')
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use caseload_core::{Allocation, ClientStatus, SortDirection, SortState};
    use chrono::NaiveDate;

    fn client(id: &str, name: &str, units: f64, allocation: Allocation) -> Client {
        let mut c = Client::new(id, name, "Dr. Grey", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        c.units_used = units;
        c.allocation = allocation;
        c
    }

    fn app() -> App {
        let store = RosterStore::with_clients(
            PathBuf::from("unused.json"),
            vec![
                client("1", "Cora", 900.0, Allocation::Annual),
                client("2", "Abe", 30.0, Allocation::Monthly { months_assigned: 2 }),
                client("3", "Bea", 480.0, Allocation::Annual),
            ],
        );
        App::new(Config::default(), None, store)
    }

    fn type_into(app: &mut App, text: &str) {
        for c in text.chars() {
            app.push_input_char(c);
        }
    }

    // -------------------------------------------------------------------------
    // View Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_rows_start_sorted_by_name() {
        let app = app();
        let names: Vec<&str> = app.rows().iter().map(|r| r.client.name.as_str()).collect();
        assert_eq!(names, vec!["Abe", "Bea", "Cora"]);
        assert_eq!(app.selected_client().unwrap().name, "Abe");
    }

    #[test]
    fn test_initial_sort_comes_from_config() {
        let mut config = Config::default();
        config.remember_sort(SortState::new(SortField::UnitsUsed, SortDirection::Descending));
        let app = App::new(config, None, app().store);
        assert_eq!(app.selected_client().unwrap().name, "Cora");
    }

    #[test]
    fn test_search_resets_selection() {
        let mut app = app();
        app.select_next(2);
        assert_eq!(app.selection, 2);
        app.push_search_char('e');
        assert_eq!(app.selection, 0);
        let names: Vec<&str> = app.rows().iter().map(|r| r.client.name.as_str()).collect();
        assert_eq!(names, vec!["Abe", "Bea"]);
        app.clear_search();
        assert_eq!(app.rows().len(), 3);
    }

    #[test]
    fn test_selection_is_bounded() {
        let mut app = app();
        app.select_next(PAGE_SCROLL_SIZE);
        assert_eq!(app.selection, 2);
        app.select_prev(PAGE_SCROLL_SIZE);
        assert_eq!(app.selection, 0);
        app.select_last();
        assert_eq!(app.selection, 2);
    }

    #[test]
    fn test_toggle_sort_flips_and_resets() {
        let mut app = app();
        app.select_next(1);
        app.toggle_sort(SortField::Name);
        assert_eq!(app.query.sort.direction, SortDirection::Descending);
        assert_eq!(app.selection, 0);
        assert_eq!(app.selected_client().unwrap().name, "Cora");
        assert_eq!(app.config.default_direction, SortDirection::Descending);
    }

    // -------------------------------------------------------------------------
    // Editing Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_units_edit_clamps_annual() {
        let mut app = app();
        app.select_last(); // Cora, annual
        app.start_units_edit();
        assert_eq!(app.state, AppState::EditingUnits);
        assert_eq!(app.input_buffer, "900");

        app.input_buffer.clear();
        type_into(&mut app, "2000");
        app.commit_edit();

        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.store.get(&"1".into()).unwrap().units_used, 960.0);
    }

    #[test]
    fn test_negative_units_become_zero() {
        let mut app = app();
        app.start_units_edit(); // Abe, monthly
        app.input_buffer.clear();
        type_into(&mut app, "-5");
        app.commit_edit();
        assert_eq!(app.store.get(&"2".into()).unwrap().units_used, 0.0);
    }

    #[test]
    fn test_months_edit_only_for_monthly() {
        let mut app = app();
        app.start_months_edit(); // Abe, monthly
        assert_eq!(app.state, AppState::EditingMonths);
        app.input_buffer.clear();
        type_into(&mut app, "15");
        app.commit_edit();
        assert_eq!(
            app.store.get(&"2".into()).unwrap().allocation,
            Allocation::Monthly { months_assigned: 12 }
        );

        app.select_last(); // Cora, annual
        app.start_months_edit();
        assert_eq!(app.state, AppState::Normal);
        assert!(app.status_message.as_deref().unwrap().contains("monthly"));
    }

    #[test]
    fn test_switch_mode_caps_units() {
        let mut app = app();
        app.select_last(); // Cora, 900 annual
        app.switch_units_mode();
        let cora = app.store.get(&"1".into()).unwrap();
        assert_eq!(cora.units_used, 240.0);
        assert_eq!(cora.allocation, Allocation::Monthly { months_assigned: 1 });
    }

    #[test]
    fn test_cycle_status() {
        let mut app = app();
        app.cycle_status(CycleDirection::Forward);
        assert_eq!(
            app.store.get(&"2".into()).unwrap().status,
            ClientStatus::CurrentAuthorization
        );
        app.cycle_status(CycleDirection::Backward);
        app.cycle_status(CycleDirection::Backward);
        assert_eq!(
            app.store.get(&"2".into()).unwrap().status,
            ClientStatus::FrequentCaregiverCancellations
        );
    }

    #[test]
    fn test_selection_follows_edited_client() {
        let mut app = app();
        app.toggle_sort(SortField::Status);
        app.store
            .apply(RosterIntent::change_status("1".into(), ClientStatus::ClientHospitalized))
            .unwrap();
        app.store
            .apply(RosterIntent::change_status("3".into(), ClientStatus::CurrentAuthorization))
            .unwrap();
        app.select_id(&"1".into());
        let abe_before = app.store.get(&"2".into()).unwrap().status;
        let bea_before = app.store.get(&"3".into()).unwrap().status;

        // Cora moves from row 0 to row 1, then to row 2
        app.cycle_status(CycleDirection::Forward);
        assert_eq!(app.selected_client().unwrap().id.as_str(), "1");
        app.cycle_status(CycleDirection::Forward);
        assert_eq!(app.selected_client().unwrap().id.as_str(), "1");

        assert_eq!(
            app.store.get(&"1".into()).unwrap().status,
            ClientStatus::NewAuthorization
        );
        assert_eq!(app.store.get(&"2".into()).unwrap().status, abe_before);
        assert_eq!(app.store.get(&"3".into()).unwrap().status, bea_before);
    }

    #[test]
    fn test_selection_follows_units_edit_when_sorted_by_units() {
        let mut app = app();
        app.toggle_sort(SortField::UnitsUsed); // Abe 30, Bea 480, Cora 900
        app.start_units_edit();
        app.input_buffer.clear();
        type_into(&mut app, "100");
        app.commit_edit();
        assert_eq!(app.selected_client().unwrap().id.as_str(), "2");

        app.select_first();
        app.start_units_edit();
        app.input_buffer.clear();
        type_into(&mut app, "950");
        app.commit_edit();
        assert_eq!(app.selection, 2);
        assert_eq!(app.selected_client().unwrap().id.as_str(), "2");
    }

    #[test]
    fn test_fractional_units_prefill_fits_buffer() {
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(1.0 / 3.0), "0.3");
        assert_eq!(format_number(480.0), "480");
        assert!(format_number(239.123456789).len() <= MAX_NUMBER_LENGTH);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = app();
        app.select_last();
        app.request_delete();
        assert_eq!(app.state, AppState::ConfirmingDelete);
        assert_eq!(app.store.clients().len(), 3);

        app.confirm_delete();
        assert_eq!(app.store.clients().len(), 2);
        assert!(app.store.get(&"1".into()).is_none());
        assert_eq!(app.selection, 1);
    }

    #[test]
    fn test_add_selects_new_client() {
        let mut app = app();
        app.dispatch(RosterIntent::AddClient);
        assert_eq!(app.store.clients().len(), 4);
        assert_eq!(app.selected_client().unwrap().name, crate::store::NEW_CLIENT_NAME);
    }

    #[test]
    fn test_failed_import_reports_error() {
        let mut app = app();
        app.dispatch(RosterIntent::ImportRequested);
        assert!(app.status_message.as_deref().unwrap().starts_with("Error:"));
        assert_eq!(app.store.clients().len(), 3);
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_number_char() {
        assert!(can_add_number_char(0, '4'));
        assert!(can_add_number_char(0, '.'));
        assert!(can_add_number_char(0, '-'));
        assert!(!can_add_number_char(0, 'x'));
        assert!(!can_add_number_char(8, '1'));
    }

    #[test]
    fn test_can_add_search_char() {
        assert!(can_add_search_char(0, 'a'));
        assert!(can_add_search_char(0, ' '));
        assert!(!can_add_search_char(64, 'a'));
        assert!(!can_add_search_char(0, '\n'));
    }
}
