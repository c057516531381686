//! Caseload core: the roster view model.
//!
//! Pure functions over a host-owned client list:
//!
//! - `models`: `Client`, `ClientStatus`, `Allocation`
//! - `roster`: filtering, sorting, utilization, units normalization, intents
//! - `utils`: string helpers shared with hosts
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod error;
pub mod models;
pub mod roster;
pub mod utils;

pub use error::RosterError;
pub use models::{Allocation, Client, ClientId, ClientStatus, UnitsMode};
pub use roster::{
    RosterIntent, RosterQuery, RosterRow, RosterSummary, SortDirection, SortField, SortState,
    UnitsChange, Utilization,
};
