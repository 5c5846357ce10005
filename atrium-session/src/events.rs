//! Session event hub.
//!
//! Downstream components (the workspace fetch trigger, UI glue) register
//! async listeners for store-level transitions. Emission snapshots the
//! listener list under the lock and awaits listeners afterwards; no lock is
//! ever held across an await.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::identity::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

static LISTENER_ID: AtomicU64 = AtomicU64::new(1);

fn next_listener_id() -> ListenerId {
    ListenerId(LISTENER_ID.fetch_add(1, Ordering::Relaxed))
}

/// Store-level session transitions, emitted after the state change they
/// describe has been applied.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// An identity became available: provider sign-in, session restore, or
    /// OTP verification.
    Authenticated(Identity),
    SignedOut,
    TokenRefreshed,
}

pub type ListenerFut<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

pub type SessionListener =
    Arc<dyn for<'a> Fn(&'a SessionEvent) -> ListenerFut<'a> + Send + Sync>;

#[derive(Default)]
pub struct SessionEvents {
    listeners: RwLock<Vec<(ListenerId, SessionListener)>>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an async listener.
    pub fn on<F>(&self, listener: F) -> ListenerId
    where
        F: for<'a> Fn(&'a SessionEvent) -> ListenerFut<'a> + Send + Sync + 'static,
    {
        let id = next_listener_id();
        self.listeners.write().unwrap().push((id, Arc::new(listener)));
        id
    }

    pub fn off(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        before != listeners.len()
    }

    pub async fn emit(&self, event: &SessionEvent) {
        // Snapshot under the lock, await with the lock released.
        let snapshot: Vec<SessionListener> = self
            .listeners
            .read()
            .unwrap()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in &snapshot {
            listener(event).await;
        }
    }
}
