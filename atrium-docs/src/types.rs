//! Document library wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document in the library.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub org_id: Option<String>,
    pub industry: String,
    pub file_name: String,
    pub url: String,
    /// Backend training state ("uploaded", "processing", "trained", ...);
    /// this is the staleness marker the UI keys off.
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update applied to a cached document.
#[derive(Clone, Debug, Default)]
pub struct DocumentPatch {
    pub status: Option<String>,
    pub url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Envelope the list endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
pub(crate) struct DocumentsEnvelope {
    pub data: Vec<Document>,
}
