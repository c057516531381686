//! Data models for roster entities.
//!
//! - `Client`, `ClientId`: a roster record and its identifier
//! - `ClientStatus`: the closed set of authorization statuses
//! - `Allocation`, `UnitsMode`: annual or monthly unit allocation

pub mod allocation;
pub mod client;
pub mod status;

pub use allocation::{
    Allocation, UnitsMode, ANNUAL_UNIT_CAPACITY, MAX_MONTHLY_UNITS, MAX_MONTHS_ASSIGNED,
    MONTHLY_UNIT_ALLOWANCE,
};
pub use client::{Client, ClientId};
pub use status::ClientStatus;
