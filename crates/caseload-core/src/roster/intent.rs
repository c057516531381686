use serde::Serialize;

use crate::models::{ClientId, ClientStatus};

use super::units::UnitsChange;

/// A user request raised by the roster view for the owner to apply.
///
/// The roster never mutates clients itself; it only describes what the user
/// asked for. Import and export carry no payload, since their formats belong
/// to the owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RosterIntent {
    ChangeStatus { id: ClientId, status: ClientStatus },
    ChangeUnits(UnitsChange),
    DeleteClient { id: ClientId },
    AddClient,
    ImportRequested,
    ExportRequested,
}

impl RosterIntent {
    pub fn change_status(id: ClientId, status: ClientStatus) -> Self {
        RosterIntent::ChangeStatus { id, status }
    }

    pub fn delete(id: ClientId) -> Self {
        RosterIntent::DeleteClient { id }
    }

    /// Client the intent applies to, if any.
    pub fn target(&self) -> Option<&ClientId> {
        match self {
            RosterIntent::ChangeStatus { id, .. } | RosterIntent::DeleteClient { id } => Some(id),
            RosterIntent::ChangeUnits(change) => Some(&change.id),
            RosterIntent::AddClient | RosterIntent::ImportRequested | RosterIntent::ExportRequested => None,
        }
    }

    /// Deletion cannot be undone; hosts should confirm it first.
    pub fn is_destructive(&self) -> bool {
        matches!(self, RosterIntent::DeleteClient { .. })
    }

    /// Short description for status lines and logs.
    pub fn describe(&self) -> String {
        match self {
            RosterIntent::ChangeStatus { status, .. } => format!("Status set to {}", status),
            RosterIntent::ChangeUnits(change) => match change.months_assigned() {
                Some(months) => format!("Units set to {} over {} mo", change.units_used, months),
                None => format!("Units set to {} (annual)", change.units_used),
            },
            RosterIntent::DeleteClient { .. } => "Client deleted".to_string(),
            RosterIntent::AddClient => "Client added".to_string(),
            RosterIntent::ImportRequested => "Import requested".to_string(),
            RosterIntent::ExportRequested => "Export requested".to_string(),
        }
    }
}
