use thiserror::Error;

use crate::models::MAX_MONTHS_ASSIGNED;

/// Errors raised when an owner parses roster values from text.
///
/// The view pipeline itself never fails; these only surface from the
/// `FromStr` impls and checked constructors used at the owner boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Unknown client status: {0}")]
    UnknownStatus(String),

    #[error("Unknown units mode: {0} (expected \"annual\" or \"monthly\")")]
    UnknownUnitsMode(String),

    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("Months assigned must be between 1 and {max}, got {0}", max = MAX_MONTHS_ASSIGNED)]
    MonthsOutOfRange(i64),
}
