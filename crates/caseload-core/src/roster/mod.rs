//! The roster view pipeline.
//!
//! Client list → [`filter`] by name → [`sort`] by column → per-row
//! [`utilization`]. Edits travel the other way as [`RosterIntent`]s that the
//! owner of the list applies before handing back a new list.
//!
//! - `filter`: case-insensitive name search
//! - `sort`: sortable columns, direction, toggle behavior
//! - `utilization`: percentage of capacity used
//! - `units`: normalization of unit and month edits
//! - `intent`: requests emitted to the owner

pub mod filter;
pub mod intent;
pub mod sort;
pub mod units;
pub mod utilization;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Client;

pub use filter::filter_by_name;
pub use intent::RosterIntent;
pub use sort::{sort_clients, ClientComparator, SortDirection, SortField, SortState};
pub use units::{clamp_units, parse_months, parse_units, UnitsChange};
pub use utilization::{utilization, Utilization};

/// Search text and sort order for one pass over the roster.
///
/// Owned by the caller and passed in on every pass; the roster keeps nothing
/// between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterQuery {
    pub search: String,
    pub sort: SortState,
}

impl RosterQuery {
    pub fn new(search: impl Into<String>, sort: SortState) -> Self {
        Self {
            search: search.into(),
            sort,
        }
    }

    /// Filter, sort, and annotate `clients` for display.
    pub fn rows<'a>(&self, clients: &'a [Client]) -> Vec<RosterRow<'a>> {
        let filtered = filter_by_name(clients, &self.search);
        let rows: Vec<RosterRow<'a>> = sort_clients(&filtered, self.sort)
            .into_iter()
            .map(RosterRow::new)
            .collect();

        debug!(
            total = clients.len(),
            shown = rows.len(),
            field = self.sort.field.key(),
            direction = ?self.sort.direction,
            "Built roster rows"
        );
        rows
    }
}

/// A client paired with its derived utilization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterRow<'a> {
    pub client: &'a Client,
    pub utilization: Utilization,
}

impl<'a> RosterRow<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            utilization: utilization(client),
        }
    }
}

/// Counts for a status line: rows shown out of the full list, and how many
/// shown rows are over capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterSummary {
    pub shown: usize,
    pub total: usize,
    pub over_allocated: usize,
}

impl RosterSummary {
    pub fn from_rows(rows: &[RosterRow<'_>], total: usize) -> Self {
        Self {
            shown: rows.len(),
            total,
            over_allocated: rows.iter().filter(|r| r.utilization.is_over_allocated()).count(),
        }
    }

    pub fn is_filtered(&self) -> bool {
        self.shown != self.total
    }
}
