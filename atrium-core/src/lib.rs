//! atrium-core: cross-cutting boundaries for the Atrium state core.
//!
//! The store crates share exactly four seams: a durable key-value slot, a
//! reset capability for tenant-scoped caches, a read-only view of the
//! current session token, and the public-route allow-list. They live here
//! so the stores can be composed without depending on each other.

pub mod error;
pub mod routes;
pub mod scoped;
pub mod storage;
pub mod token;

pub use error::ErrorInfo;
pub use routes::RouteTable;
pub use scoped::TenantScoped;
pub use storage::{KeyValueStorage, MemoryStorage, PROFILE_SLOT, TENANT_KEY_SLOT};
pub use token::{FixedTokenSource, TokenSource};
