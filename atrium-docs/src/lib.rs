//! atrium-docs: tenant-scoped resource caches and the document library.
//!
//! Both caches here belong to exactly one tenant at a time. They implement
//! the shared reset capability, so the workspace switch protocol and the
//! sign-out cascade can empty them without knowing what they hold.
//!
//! [`DocumentsService`] is the write path for the document library: upload,
//! train, delete, each token-gated and followed by a re-list so the cache
//! picks up server-assigned ids and status changes.

pub mod api;
pub mod cache;
pub mod error;
pub mod org_settings;
pub mod service;
pub mod types;

pub use api::{DocumentUpload, DocumentsApi, HttpDocumentsApi};
pub use cache::{DocumentsCache, DocumentsState};
pub use error::{DocsError, DocsResult};
pub use org_settings::{OrgSettings, OrgSettingsCache, OrgSettingsState};
pub use service::DocumentsService;
pub use types::{Document, DocumentPatch};
