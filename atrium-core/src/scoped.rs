//! Tenant-scoped cache capability.

/// A cache whose contents belong to exactly one tenant.
///
/// The switch protocol and the sign-out cascade hold these as a uniform
/// list; they only ever need the one capability.
pub trait TenantScoped: Send + Sync {
    /// Drop everything owned by the current tenant and return to the
    /// uninitialized state.
    fn reset(&self);
}
