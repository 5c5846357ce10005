//! Durable key-value slots.
//!
//! The dashboard persists exactly two things across process restarts: the
//! active tenant key and the session-derived profile. Both live behind this
//! boundary so the stores never touch a concrete storage mechanism, and so
//! tests can observe persistence directly.
//!
//! Absence is a valid value for every slot. Stores reconcile with storage
//! during initialization only and never read it back afterwards.

use std::collections::HashMap;
use std::sync::RwLock;

/// Slot holding the active tenant key. The only piece of tenant state that
/// outlives the process.
pub const TENANT_KEY_SLOT: &str = "tenantId";

/// Slot holding the session-derived profile, cleared on sign-out.
pub const PROFILE_SLOT: &str = "userProfile";

pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage, for tests and embedded use.
#[derive(Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.slots
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.slots.write().unwrap().remove(key);
    }
}
