//! Remote-data cache invalidation boundary.

use async_trait::async_trait;

/// Tags attached to tenant-scoped query keys in the remote-data cache.
pub const TENANT_SCOPED_TAGS: [&str; 4] = ["documents", "orgSettings", "members", "tenant"];

/// Hook into an external remote-data cache.
///
/// Called on every workspace commit with the new tenant key so the cache
/// drops or refetches entries carrying the tenant-scoped tags. The hook is
/// infallible at this boundary: the key is already committed when it runs,
/// so implementations log their own failures and the next read repairs any
/// staleness.
#[async_trait]
pub trait QueryInvalidator: Send + Sync {
    async fn invalidate_tenant_scoped(&self, tenant_key: &str, tags: &[&str]);
}
