use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::models::Client;

/// Comparator over two clients.
pub type ClientComparator = fn(&Client, &Client) -> Ordering;

// ============================================================================
// Sort Field
// ============================================================================

/// Sortable roster columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Name,
    Clinician,
    AssignedDate,
    UnitsUsed,
    UnitsMode,
    Status,
    LastUpdated,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        SortField::Name,
        SortField::Clinician,
        SortField::AssignedDate,
        SortField::UnitsUsed,
        SortField::UnitsMode,
        SortField::Status,
        SortField::LastUpdated,
    ];

    /// Column header text.
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "Client Name",
            SortField::Clinician => "Clinician",
            SortField::AssignedDate => "Assigned",
            SortField::UnitsUsed => "Units",
            SortField::UnitsMode => "Mode",
            SortField::Status => "Status",
            SortField::LastUpdated => "Last Updated",
        }
    }

    /// Identifier used in config files, matching the serialized form.
    pub fn key(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Clinician => "clinician",
            SortField::AssignedDate => "assignedDate",
            SortField::UnitsUsed => "unitsUsed",
            SortField::UnitsMode => "unitsMode",
            SortField::Status => "status",
            SortField::LastUpdated => "lastUpdated",
        }
    }

    /// Natural ordering of this field's value.
    ///
    /// Strings compare lexicographically, numbers numerically, dates
    /// chronologically. Status compares by its label and mode by its
    /// lowercase name, the same values they serialize to.
    pub fn comparator(&self) -> ClientComparator {
        match self {
            SortField::Name => |a: &Client, b: &Client| a.name.cmp(&b.name),
            SortField::Clinician => |a: &Client, b: &Client| a.clinician.cmp(&b.clinician),
            SortField::AssignedDate => |a: &Client, b: &Client| a.assigned_date.cmp(&b.assigned_date),
            SortField::UnitsUsed => |a: &Client, b: &Client| a.units_used.total_cmp(&b.units_used),
            SortField::UnitsMode => |a: &Client, b: &Client| a.units_mode().as_str().cmp(b.units_mode().as_str()),
            SortField::Status => |a: &Client, b: &Client| a.status.label().cmp(b.status.label()),
            SortField::LastUpdated => |a: &Client, b: &Client| a.last_updated.cmp(&b.last_updated),
        }
    }

    /// Field comparison followed by name, then id, so equal keys still
    /// produce a repeatable order.
    pub fn compare(&self, a: &Client, b: &Client) -> Ordering {
        (self.comparator())(a, b)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortField {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RosterError::UnknownSortField(s.to_string()))
    }
}

// ============================================================================
// Sort Direction / State
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort column and direction. Defaults to name, ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// If already sorting by this field, flip direction; otherwise switch to
    /// this field ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Header suffix for `field`: an arrow when it is the active column.
    pub fn indicator_for(&self, field: SortField) -> &'static str {
        if self.field == field {
            self.direction.indicator()
        } else {
            ""
        }
    }

    pub fn compare(&self, a: &Client, b: &Client) -> Ordering {
        self.direction.apply(self.field.compare(a, b))
    }
}

/// Sort clients by `state`, returning a new ordering of the same references.
pub fn sort_clients<'a>(clients: &[&'a Client], state: SortState) -> Vec<&'a Client> {
    let mut sorted = clients.to_vec();
    sorted.sort_by(|a, b| state.compare(a, b));
    sorted
}
