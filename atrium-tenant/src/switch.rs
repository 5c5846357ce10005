//! The workspace switch protocol.
//!
//! Dependent caches are reset BEFORE the target is validated. A failed
//! switch must never leave caches holding data scoped to a tenant the UI no
//! longer considers active; an empty or loading state is safer than another
//! tenant's data mislabeled as the current one.

use tracing::{debug, warn};

use atrium_core::TENANT_KEY_SLOT;

use crate::invalidate::TENANT_SCOPED_TAGS;
use crate::store::TenantStore;
use crate::{TenantError, TenantResult};

/// Terminal phase of a switch attempt. Rollback is reported through the
/// error path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The target was already active; nothing happened.
    Noop,
    Committed,
}

impl TenantStore {
    /// Move the session onto another workspace.
    ///
    /// Runs Idle -> Switching -> Committed, or rolls back when the target
    /// is not in the current directory snapshot: the persisted key is
    /// restored to the prior value, the failure is recorded in `error`, and
    /// the error propagates. This is the one failure in the store that is
    /// surfaced rather than swallowed - the user explicitly picked this
    /// workspace and must get feedback.
    ///
    /// A call while another switch is in flight is rejected with
    /// [`TenantError::SwitchInProgress`].
    pub async fn switch_workspace(&self, target: &str) -> TenantResult<SwitchOutcome> {
        let prior = {
            let mut state = self.state().write().unwrap();
            if state.active_tenant.as_deref() == Some(target) {
                return Ok(SwitchOutcome::Noop);
            }
            if state.is_switching {
                return Err(TenantError::SwitchInProgress);
            }
            state.is_switching = true;
            state.error = None;
            state.active_tenant.clone()
        };

        // Any in-flight fetch is now stale.
        self.bump_generation();

        // Eager invalidation, before the target is known to exist.
        self.reset_dependent_caches();

        let resolved = {
            let state = self.state().read().unwrap();
            state
                .workspaces
                .as_ref()
                .and_then(|directory| directory.find(target))
                .is_some()
        };

        if !resolved {
            warn!(key = target, "workspace not found, rolling back switch");
            match &prior {
                Some(key) => self.storage().set(TENANT_KEY_SLOT, key),
                None => self.storage().remove(TENANT_KEY_SLOT),
            }
            let err = TenantError::not_found(target);
            {
                let mut state = self.state().write().unwrap();
                state.error = Some(err.to_info());
                state.is_switching = false;
            }
            return Err(err);
        }

        self.set_active_tenant(Some(target));

        // Commit companion: tell the remote-data cache to drop or refetch
        // everything keyed by tenant. `is_switching` stays up until the
        // cache has been told, so the reentrancy guard covers the whole
        // protocol.
        if let Some(invalidator) = self.invalidator() {
            invalidator
                .invalidate_tenant_scoped(target, &TENANT_SCOPED_TAGS)
                .await;
        }

        {
            let mut state = self.state().write().unwrap();
            state.is_switching = false;
            state.error = None;
        }
        debug!(key = target, "workspace switch committed");

        Ok(SwitchOutcome::Committed)
    }
}
