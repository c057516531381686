//! In-memory owner of the client list.
//!
//! Applies the intents raised by the roster view, stamps `last_updated` on
//! every mutation, and handles import/export of the roster file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use caseload_core::{Client, ClientId, RosterIntent, UnitsChange};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Name given to clients created with "add".
pub const NEW_CLIENT_NAME: &str = "New Client";

/// Clinician shown until one is assigned.
pub const UNASSIGNED_CLINICIAN: &str = "Unassigned";

/// What applying an intent did.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Updated(ClientId),
    Added(ClientId),
    Removed(ClientId),
    Imported(usize),
    Exported(usize),
    /// The intent named a client that no longer exists.
    Missing(ClientId),
}

pub struct RosterStore {
    clients: Vec<Client>,
    path: PathBuf,
}

impl RosterStore {
    pub fn new(path: PathBuf) -> Self {
        Self::with_clients(path, Vec::new())
    }

    pub fn with_clients(path: PathBuf, clients: Vec<Client>) -> Self {
        Self { clients, path }
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, id: &ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| &c.id == id)
    }

    fn get_mut(&mut self, id: &ClientId) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| &c.id == id)
    }

    /// Apply an intent to the list.
    ///
    /// Only import/export can fail; edits to unknown ids are reported as
    /// [`Applied::Missing`] and leave the list untouched.
    pub fn apply(&mut self, intent: RosterIntent) -> Result<Applied> {
        info!(intent = %intent.describe(), target = ?intent.target(), "Applying roster intent");

        let applied = match intent {
            RosterIntent::ChangeStatus { id, status } => match self.get_mut(&id) {
                Some(client) => {
                    client.status = status;
                    client.last_updated = Utc::now();
                    Applied::Updated(id)
                }
                None => Applied::Missing(id),
            },
            RosterIntent::ChangeUnits(change) => match self.get_mut(&change.id) {
                Some(client) => {
                    client.units_used = change.units_used;
                    client.allocation = change.allocation;
                    client.last_updated = Utc::now();
                    Applied::Updated(change.id)
                }
                None => Applied::Missing(change.id),
            },
            RosterIntent::DeleteClient { id } => {
                let before = self.clients.len();
                self.clients.retain(|c| c.id != id);
                if self.clients.len() < before {
                    Applied::Removed(id)
                } else {
                    Applied::Missing(id)
                }
            }
            RosterIntent::AddClient => {
                let client = Self::new_client();
                let id = client.id.clone();
                self.clients.push(client);
                Applied::Added(id)
            }
            RosterIntent::ImportRequested => Applied::Imported(self.import()?),
            RosterIntent::ExportRequested => Applied::Exported(self.export()?),
        };

        if let Applied::Missing(ref id) = applied {
            warn!(%id, "Intent targeted a client that is not on the roster");
        }
        Ok(applied)
    }

    fn new_client() -> Client {
        let today = Utc::now().date_naive();
        Client::new(
            uuid::Uuid::new_v4().to_string(),
            NEW_CLIENT_NAME,
            UNASSIGNED_CLINICIAN,
            today,
        )
    }

    /// Replace the list with the contents of the roster file.
    fn import(&mut self) -> Result<usize> {
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read roster {}", self.path.display()))?;
        let mut clients: Vec<Client> = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid roster file {}", self.path.display()))?;
        clients.iter_mut().for_each(normalize_allocation);
        debug!(count = clients.len(), path = %self.path.display(), "Imported roster");
        self.clients = clients;
        Ok(self.clients.len())
    }

    /// Write the list to the roster file.
    fn export(&self) -> Result<usize> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.clients)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write roster {}", self.path.display()))?;
        debug!(count = self.clients.len(), path = %self.path.display(), "Exported roster");
        Ok(self.clients.len())
    }

    /// Load the roster file if it exists. A missing file is an empty roster.
    pub fn load_existing(&mut self) -> Result<usize> {
        if self.path.exists() {
            self.import()
        } else {
            Ok(0)
        }
    }
}

/// Bring an imported record inside its allocation's bounds: units in
/// `[0, 960]` for annual clients, non-negative for monthly ones, and months in
/// `[1, 12]`.
fn normalize_allocation(client: &mut Client) {
    let change = UnitsChange::normalized(client.id.clone(), client.units_used, client.allocation);
    if change.units_used != client.units_used || change.allocation != client.allocation {
        warn!(
            id = %client.id,
            units = client.units_used,
            clamped_units = change.units_used,
            allocation = %client.allocation,
            clamped_allocation = %change.allocation,
            "Imported client outside allocation bounds"
        );
        client.units_used = change.units_used;
        client.allocation = change.allocation;
    }
}
