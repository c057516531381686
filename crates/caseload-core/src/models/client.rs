use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Allocation, ClientStatus, UnitsMode};

/// Opaque client identifier, stable for the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ClientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A client on the roster.
///
/// Records are owned by the host. The roster core reads them and derives
/// views but never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub clinician: String,
    pub assigned_date: NaiveDate,
    pub units_used: f64,
    #[serde(flatten)]
    pub allocation: Allocation,
    pub status: ClientStatus,
    pub last_updated: DateTime<Utc>,
}

impl Client {
    /// New annual client with no units used and the default status.
    pub fn new(
        id: impl Into<ClientId>,
        name: impl Into<String>,
        clinician: impl Into<String>,
        assigned_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            clinician: clinician.into(),
            assigned_date,
            units_used: 0.0,
            allocation: Allocation::Annual,
            status: ClientStatus::default(),
            last_updated: Utc::now(),
        }
    }

    pub fn units_mode(&self) -> UnitsMode {
        self.allocation.mode()
    }

    /// Months assigned, falling back to 1 for monthly clients; `None` when annual.
    pub fn months_assigned(&self) -> Option<u8> {
        self.allocation.months_assigned().map(|m| m.max(1))
    }

    pub fn capacity(&self) -> f64 {
        self.allocation.capacity()
    }

    /// Capacity minus units used. Negative when over-allocated.
    pub fn remaining_units(&self) -> f64 {
        self.capacity() - self.units_used
    }

    /// Units column text, e.g. `480 / 960` or `30 hrs / 2 mo`.
    pub fn units_display(&self) -> String {
        match self.allocation {
            Allocation::Annual => format!("{} / {}", format_units(self.units_used), self.capacity()),
            Allocation::Monthly { .. } => format!(
                "{} hrs / {} mo",
                format_units(self.units_used),
                self.months_assigned().unwrap_or(1)
            ),
        }
    }

    pub fn assigned_date_str(&self) -> String {
        self.assigned_date.format("%b %d, %Y").to_string()
    }

    pub fn last_updated_str(&self) -> String {
        self.last_updated.format("%b %d, %Y").to_string()
    }
}

/// Whole numbers without a fractional part, half hours with one digit.
fn format_units(units: f64) -> String {
    if units.fract() == 0.0 {
        format!("{:.0}", units)
    } else {
        format!("{:.1}", units)
    }
}
