//! atrium-tenant: workspace selection and the switch protocol.
//!
//! The tenant store owns the active workspace key and the directory of
//! workspaces available to the session. Its collaborators are injected at
//! construction: the backend behind [`WorkspacesApi`], durable persistence
//! behind a key-value slot, the session token behind `TokenSource`, and the
//! tenant-scoped caches the switch protocol must reset.
//!
//! Switching is a small state machine:
//!
//! ```text
//!   Idle ──switch_workspace(key)──▶ Switching
//!      Switching ──target in directory──▶ Committed   (key persisted,
//!                                                      queries invalidated)
//!      Switching ──target unknown──────▶ RolledBack   (persisted key
//!                                                      restored, error
//!                                                      surfaced)
//! ```
//!
//! Dependent caches are reset BEFORE the target is validated: a failed
//! switch must never leave another tenant's data on screen, so empty beats
//! wrong.

pub mod api;
pub mod error;
pub mod invalidate;
pub mod store;
pub mod switch;
pub mod types;

pub use api::{HttpWorkspacesApi, WorkspacesApi};
pub use error::{TenantError, TenantResult};
pub use invalidate::{QueryInvalidator, TENANT_SCOPED_TAGS};
pub use store::{TenantState, TenantStore};
pub use switch::SwitchOutcome;
pub use types::{NewWorkspace, Workspace, WorkspaceDirectory};
