//! Scene observers
//!
//! Observers are notified when a scene unloads. The scene shares ownership
//! of each observer with whoever registered it.

use std::sync::{Arc, Mutex, PoisonError};

/// Listener notified when a scene unloads
pub trait SceneObserver: Send + Sync {
    /// Called once during scene teardown, after every object has exited
    fn on_unload(&self);
}

/// Shared handle to a scene observer
pub type ObserverHandle = Arc<dyn SceneObserver>;

/// Registration-ordered observer list
#[derive(Default)]
pub(crate) struct ObserverList {
    observers: Mutex<Vec<ObserverHandle>>,
}

impl ObserverList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach(&self, observer: ObserverHandle) {
        self.lock().push(observer);
    }

    /// Remove every registration of the observer, returns whether any existed
    pub(crate) fn detach(&self, observer: &ObserverHandle) -> bool {
        let mut observers = self.lock();
        let before = observers.len();
        observers.retain(|o| !Arc::ptr_eq(o, observer));
        observers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    /// Notify in registration order without holding the list lock
    pub(crate) fn notify_unload(&self) -> usize {
        let snapshot = self.lock().clone();
        for observer in &snapshot {
            observer.on_unload();
        }
        snapshot.len()
    }

    pub(crate) fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ObserverHandle>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
