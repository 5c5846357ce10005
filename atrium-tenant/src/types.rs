//! Workspace wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A workspace (personal or team) the session can operate in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    /// Unique human-readable key; this is the value stored as the active
    /// tenant.
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub is_personal: bool,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything `/orgs/my-workspaces` returns for a session. At most one
/// personal workspace exists; it is the default fallback.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceDirectory {
    pub personal: Option<Workspace>,
    #[serde(default)]
    pub teams: Vec<Workspace>,
}

impl WorkspaceDirectory {
    /// Resolve a tenant key: the personal slug first, then the teams in
    /// order.
    pub fn find(&self, key: &str) -> Option<&Workspace> {
        if let Some(personal) = &self.personal {
            if personal.slug == key {
                return Some(personal);
            }
        }
        self.teams.iter().find(|team| team.slug == key)
    }
}

/// Payload for creating a team workspace.
#[derive(Clone, Debug, Serialize)]
pub struct NewWorkspace {
    pub name: String,
    pub description: String,
}

/// Envelope the workspaces endpoints wrap their payloads in.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}
