use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

// ============================================================================
// Constants
// ============================================================================

/// Units available to an annual client per year.
pub const ANNUAL_UNIT_CAPACITY: f64 = 960.0;

/// Units available to a monthly client per assigned month.
pub const MONTHLY_UNIT_ALLOWANCE: f64 = 20.0;

/// Upper bound for `months_assigned`.
pub const MAX_MONTHS_ASSIGNED: u8 = 12;

/// Most units a monthly client can carry: a full year of monthly allowance.
pub const MAX_MONTHLY_UNITS: f64 = MONTHLY_UNIT_ALLOWANCE * MAX_MONTHS_ASSIGNED as f64;

fn default_months_assigned() -> u8 {
    1
}

// ============================================================================
// Units Mode
// ============================================================================

/// Which allocation formula applies to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitsMode {
    Annual,
    Monthly,
}

impl UnitsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitsMode::Annual => "annual",
            UnitsMode::Monthly => "monthly",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            UnitsMode::Annual => UnitsMode::Monthly,
            UnitsMode::Monthly => UnitsMode::Annual,
        }
    }
}

impl fmt::Display for UnitsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitsMode::Annual => write!(f, "Annual"),
            UnitsMode::Monthly => write!(f, "Monthly"),
        }
    }
}

impl FromStr for UnitsMode {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" => Ok(UnitsMode::Annual),
            "monthly" => Ok(UnitsMode::Monthly),
            _ => Err(RosterError::UnknownUnitsMode(s.to_string())),
        }
    }
}

// ============================================================================
// Allocation
// ============================================================================

/// A client's allocation. Monthly allocations carry the number of months
/// assigned, which is meaningless for annual ones.
///
/// Serialized flattened into the client record as `unitsMode` plus an
/// optional `monthsAssigned` that defaults to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "unitsMode", rename_all = "lowercase")]
pub enum Allocation {
    #[default]
    Annual,
    Monthly {
        #[serde(rename = "monthsAssigned", default = "default_months_assigned")]
        months_assigned: u8,
    },
}

impl Allocation {
    /// Build a monthly allocation, rejecting months outside `[1, 12]`.
    pub fn monthly(months_assigned: i64) -> Result<Self, RosterError> {
        if (1..=MAX_MONTHS_ASSIGNED as i64).contains(&months_assigned) {
            Ok(Allocation::Monthly {
                months_assigned: months_assigned as u8,
            })
        } else {
            Err(RosterError::MonthsOutOfRange(months_assigned))
        }
    }

    pub fn mode(&self) -> UnitsMode {
        match self {
            Allocation::Annual => UnitsMode::Annual,
            Allocation::Monthly { .. } => UnitsMode::Monthly,
        }
    }

    /// Months assigned, if monthly.
    pub fn months_assigned(&self) -> Option<u8> {
        match self {
            Allocation::Annual => None,
            Allocation::Monthly { months_assigned } => Some(*months_assigned),
        }
    }

    /// Total units available under this allocation. Always positive.
    ///
    /// A zero month count (only reachable by constructing the variant
    /// directly) is treated as one month.
    pub fn capacity(&self) -> f64 {
        match self {
            Allocation::Annual => ANNUAL_UNIT_CAPACITY,
            Allocation::Monthly { months_assigned } => {
                MONTHLY_UNIT_ALLOWANCE * f64::from((*months_assigned).max(1))
            }
        }
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Allocation::Annual => write!(f, "Annual"),
            Allocation::Monthly { months_assigned: 1 } => write!(f, "Monthly (1 mo)"),
            Allocation::Monthly { months_assigned } => write!(f, "Monthly ({} mo)", months_assigned),
        }
    }
}
