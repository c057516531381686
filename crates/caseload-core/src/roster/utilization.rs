use std::fmt;

use serde::Serialize;

use crate::models::Client;

/// Share of a client's capacity already used, as a percentage.
///
/// The value is unbounded above: anything past 100 means the client is
/// over-allocated. Only the progress bar is clamped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Utilization(f64);

impl Utilization {
    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Percentage rounded to one decimal place.
    pub fn rounded(&self) -> f64 {
        (self.0 * 10.0).round() / 10.0
    }

    /// Width of the usage bar, clamped to `[0, 100]`.
    pub fn bar_percent(&self) -> f64 {
        self.0.clamp(0.0, 100.0)
    }

    pub fn is_over_allocated(&self) -> bool {
        self.0 > 100.0
    }
}

impl fmt::Display for Utilization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

/// `100 × units_used / capacity`, where capacity is 960 for annual clients and
/// 20 per assigned month for monthly ones.
pub fn utilization(client: &Client) -> Utilization {
    Utilization(client.units_used / client.capacity() * 100.0)
}
