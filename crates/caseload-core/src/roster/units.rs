//! Normalization of unit edits before they are emitted as intents.
//!
//! Raw editor input never fails: anything unparsable becomes a safe default
//! and out-of-range values are clamped into the allocation's bounds.

use serde::Serialize;
use tracing::debug;

use crate::models::{
    Allocation, Client, ClientId, UnitsMode, ANNUAL_UNIT_CAPACITY, MAX_MONTHLY_UNITS,
    MAX_MONTHS_ASSIGNED,
};

/// Parse a units entry. Negative, non-finite, or unparsable input becomes 0.
pub fn parse_units(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value.max(0.0),
        _ => 0.0,
    }
}

/// Parse a months entry into `[1, 12]`. Unparsable input becomes 1.
pub fn parse_months(raw: &str) -> u8 {
    let value = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc())
        .unwrap_or(1.0);
    clamp_months(value)
}

fn clamp_months(value: f64) -> u8 {
    value.clamp(1.0, f64::from(MAX_MONTHS_ASSIGNED)) as u8
}

/// Clamp a units value for the given allocation.
///
/// Annual units are whole numbers in `[0, 960]`. Monthly units only have to
/// be non-negative; over-allocation is allowed and flagged by utilization.
pub fn clamp_units(units: f64, allocation: Allocation) -> f64 {
    let units = if units.is_finite() { units.max(0.0) } else { 0.0 };
    match allocation {
        Allocation::Annual => units.trunc().min(ANNUAL_UNIT_CAPACITY),
        Allocation::Monthly { .. } => units,
    }
}

/// A normalized request to change a client's units and allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitsChange {
    pub id: ClientId,
    pub units_used: f64,
    #[serde(flatten)]
    pub allocation: Allocation,
}

impl UnitsChange {
    /// Build a change from numeric input, clamping units and months.
    pub fn normalized(id: ClientId, units_used: f64, allocation: Allocation) -> Self {
        let allocation = match allocation {
            Allocation::Annual => Allocation::Annual,
            Allocation::Monthly { months_assigned } => Allocation::Monthly {
                months_assigned: clamp_months(f64::from(months_assigned)),
            },
        };
        let clamped = clamp_units(units_used, allocation);
        if clamped != units_used {
            debug!(%id, requested = units_used, clamped, mode = %allocation.mode(), "Clamped units edit");
        }
        Self {
            id,
            units_used: clamped,
            allocation,
        }
    }

    /// New units entry for `client` in its current mode.
    pub fn edit_units(client: &Client, raw: &str) -> Self {
        Self::normalized(client.id.clone(), parse_units(raw), client.allocation)
    }

    /// New months entry for a monthly client. Annual clients have no months
    /// to edit, so this returns `None` for them.
    pub fn edit_months(client: &Client, raw: &str) -> Option<Self> {
        match client.allocation {
            Allocation::Annual => None,
            Allocation::Monthly { .. } => Some(Self {
                id: client.id.clone(),
                units_used: client.units_used,
                allocation: Allocation::Monthly {
                    months_assigned: parse_months(raw),
                },
            }),
        }
    }

    /// Switch `client` to `mode`.
    ///
    /// Annual → monthly caps units at 240 and starts at one month.
    /// Monthly → annual keeps units untouched; the annual bound is applied on
    /// the next direct edit. Choosing the current mode changes nothing.
    pub fn switch_mode(client: &Client, mode: UnitsMode) -> Self {
        let (units_used, allocation) = match (client.allocation, mode) {
            (Allocation::Annual, UnitsMode::Monthly) => (
                client.units_used.min(MAX_MONTHLY_UNITS),
                Allocation::Monthly { months_assigned: 1 },
            ),
            (Allocation::Monthly { .. }, UnitsMode::Annual) => (client.units_used, Allocation::Annual),
            (current, _) => (client.units_used, current),
        };
        Self {
            id: client.id.clone(),
            units_used,
            allocation,
        }
    }

    pub fn mode(&self) -> UnitsMode {
        self.allocation.mode()
    }

    pub fn months_assigned(&self) -> Option<u8> {
        self.allocation.months_assigned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn client(units: f64, allocation: Allocation) -> Client {
        let mut c = Client::new("c1", "A", "Dr. Grey", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        c.units_used = units;
        c.allocation = allocation;
        c
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("12.5"), 12.5);
        assert_eq!(parse_units(" 40 "), 40.0);
        assert_eq!(parse_units("-5"), 0.0);
        assert_eq!(parse_units("abc"), 0.0);
        assert_eq!(parse_units(""), 0.0);
        assert_eq!(parse_units("NaN"), 0.0);
        assert_eq!(parse_units("inf"), 0.0);
    }

    #[test]
    fn test_parse_months() {
        assert_eq!(parse_months("3"), 3);
        assert_eq!(parse_months("0"), 1);
        assert_eq!(parse_months("-4"), 1);
        assert_eq!(parse_months("13"), 12);
        assert_eq!(parse_months("6.9"), 6);
        assert_eq!(parse_months("six"), 1);
    }

    #[test]
    fn test_annual_edit_clamps() {
        let c = client(100.0, Allocation::Annual);
        assert_eq!(UnitsChange::edit_units(&c, "-5").units_used, 0.0);
        assert_eq!(UnitsChange::edit_units(&c, "2000").units_used, 960.0);
        assert_eq!(UnitsChange::edit_units(&c, "12.7").units_used, 12.0);
        assert_eq!(UnitsChange::edit_units(&c, "oops").units_used, 0.0);
    }

    #[test]
    fn test_monthly_edit_has_no_upper_bound() {
        let c = client(10.0, Allocation::Monthly { months_assigned: 2 });
        let change = UnitsChange::edit_units(&c, "500.5");
        assert_eq!(change.units_used, 500.5);
        assert_eq!(change.months_assigned(), Some(2));
        assert_eq!(UnitsChange::edit_units(&c, "-1").units_used, 0.0);
    }

    #[test]
    fn test_edit_months() {
        let monthly = client(10.0, Allocation::Monthly { months_assigned: 2 });
        let change = UnitsChange::edit_months(&monthly, "20").unwrap();
        assert_eq!(change.months_assigned(), Some(12));
        assert_eq!(change.units_used, 10.0);

        let annual = client(10.0, Allocation::Annual);
        assert_eq!(UnitsChange::edit_months(&annual, "3"), None);
    }

    #[test]
    fn test_switch_annual_to_monthly_caps_units() {
        let c = client(900.0, Allocation::Annual);
        let change = UnitsChange::switch_mode(&c, UnitsMode::Monthly);
        assert_eq!(change.units_used, 240.0);
        assert_eq!(change.allocation, Allocation::Monthly { months_assigned: 1 });

        let small = client(35.0, Allocation::Annual);
        assert_eq!(UnitsChange::switch_mode(&small, UnitsMode::Monthly).units_used, 35.0);
    }

    #[test]
    fn test_switch_monthly_to_annual_preserves_units() {
        let c = client(1200.0, Allocation::Monthly { months_assigned: 5 });
        let change = UnitsChange::switch_mode(&c, UnitsMode::Annual);
        assert_eq!(change.units_used, 1200.0);
        assert_eq!(change.allocation, Allocation::Annual);
    }

    #[test]
    fn test_switch_to_current_mode_is_noop() {
        let c = client(30.0, Allocation::Monthly { months_assigned: 4 });
        let change = UnitsChange::switch_mode(&c, UnitsMode::Monthly);
        assert_eq!(change.units_used, 30.0);
        assert_eq!(change.allocation, Allocation::Monthly { months_assigned: 4 });
    }

    #[test]
    fn test_normalized_clamps_months() {
        let change = UnitsChange::normalized(
            ClientId::new("c1"),
            -3.0,
            Allocation::Monthly { months_assigned: 0 },
        );
        assert_eq!(change.units_used, 0.0);
        assert_eq!(change.months_assigned(), Some(1));
    }
}
