use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Authorization status of a client.
///
/// Declaration order is the display order used by status selectors, which is
/// intentionally not alphabetical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientStatus {
    #[default]
    #[serde(rename = "New Authorization")]
    NewAuthorization,
    #[serde(rename = "Current Authorization")]
    CurrentAuthorization,
    #[serde(rename = "Current Authorization (New LBS)")]
    CurrentAuthorizationNewLbs,
    #[serde(rename = "Newly Assigned")]
    NewlyAssigned,
    #[serde(rename = "Client Hospitalized")]
    ClientHospitalized,
    #[serde(rename = "Frequent Caregiver Cancellations")]
    FrequentCaregiverCancellations,
}

impl ClientStatus {
    /// Every status, in display order.
    pub const ALL: [ClientStatus; 6] = [
        ClientStatus::NewAuthorization,
        ClientStatus::CurrentAuthorization,
        ClientStatus::CurrentAuthorizationNewLbs,
        ClientStatus::NewlyAssigned,
        ClientStatus::ClientHospitalized,
        ClientStatus::FrequentCaregiverCancellations,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClientStatus::NewAuthorization => "New Authorization",
            ClientStatus::CurrentAuthorization => "Current Authorization",
            ClientStatus::CurrentAuthorizationNewLbs => "Current Authorization (New LBS)",
            ClientStatus::NewlyAssigned => "Newly Assigned",
            ClientStatus::ClientHospitalized => "Client Hospitalized",
            ClientStatus::FrequentCaregiverCancellations => "Frequent Caregiver Cancellations",
        }
    }

    /// Position in display order.
    pub fn order(&self) -> usize {
        *self as usize
    }

    /// Get the next status in display order (wrapping around)
    pub fn next(&self) -> Self {
        Self::ALL[(self.order() + 1) % Self::ALL.len()]
    }

    /// Get the previous status in display order (wrapping around)
    pub fn prev(&self) -> Self {
        Self::ALL[(self.order() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClientStatus {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.label() == trimmed)
            .ok_or_else(|| RosterError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order_is_not_alphabetical() {
        let labels: Vec<&str> = ClientStatus::ALL.iter().map(|s| s.label()).collect();
        let mut alphabetical = labels.clone();
        alphabetical.sort();
        assert_ne!(labels, alphabetical);
        assert_eq!(labels[0], "New Authorization");
        assert_eq!(labels[5], "Frequent Caregiver Cancellations");
    }

    #[test]
    fn test_next_prev_wrap() {
        assert_eq!(ClientStatus::NewAuthorization.next(), ClientStatus::CurrentAuthorization);
        assert_eq!(
            ClientStatus::FrequentCaregiverCancellations.next(),
            ClientStatus::NewAuthorization
        );
        assert_eq!(
            ClientStatus::NewAuthorization.prev(),
            ClientStatus::FrequentCaregiverCancellations
        );
        for status in ClientStatus::ALL {
            assert_eq!(status.next().prev(), status);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "Current Authorization (New LBS)".parse::<ClientStatus>(),
            Ok(ClientStatus::CurrentAuthorizationNewLbs)
        );
        assert_eq!(" Newly Assigned ".parse::<ClientStatus>(), Ok(ClientStatus::NewlyAssigned));
        assert_eq!(
            "Discharged".parse::<ClientStatus>(),
            Err(RosterError::UnknownStatus("Discharged".to_string()))
        );
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&ClientStatus::ClientHospitalized).unwrap();
        assert_eq!(json, "\"Client Hospitalized\"");
    }
}
