//! Identity records and their display projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity record in the shape the provider hands it over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawIdentity {
    pub id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
}

/// The authenticated identity held by the session store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub metadata: Map<String, Value>,
}

impl Identity {
    pub fn from_raw(raw: &RawIdentity) -> Self {
        Self {
            id: raw.id.clone(),
            email: raw.email.clone(),
            phone: raw.phone.clone(),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            metadata: raw.user_metadata.clone(),
        }
    }
}

/// Display-oriented projection of an identity. Persisted across restarts
/// under the profile slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// `name` falls back from `name` to `full_name` in the metadata; an
    /// empty avatar URL counts as absent.
    pub fn from_raw(raw: &RawIdentity) -> Self {
        let meta = &raw.user_metadata;

        let name = meta
            .get("name")
            .and_then(|v| v.as_str())
            .or_else(|| meta.get("full_name").and_then(|v| v.as_str()))
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let avatar_url = meta
            .get("avatar_url")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);

        Self {
            id: raw.id.clone(),
            email: raw.email.clone().unwrap_or_default(),
            name,
            avatar_url,
            phone: raw.phone.clone(),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }
}
