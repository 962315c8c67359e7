//! Guarded object container
//!
//! An ordered sequence of object handles behind a single mutex. Every
//! traversal or mutation happens inside one critical section; the guard is
//! released on every exit path, including panics inside object callbacks.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::scene::object::{ObjectHandle, ObjectKind, SceneObject, SystemKind};

/// Outcome of emptying a container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainStats {
    /// Objects that received `exit`
    pub exited: usize,
    /// Objects whose `exit` returned an error or panicked
    pub failed: usize,
}

/// Mutex-protected sequence of scene objects
///
/// The container belongs to one scene and releases that scene's membership
/// claim on every object it drops.
pub struct ObjectContainer {
    owner: u64,
    objects: Mutex<Vec<ObjectHandle>>,
}

impl ObjectContainer {
    /// Create an empty container for the scene with id `owner`
    pub fn new(owner: u64) -> Self {
        Self {
            owner,
            objects: Mutex::new(Vec::new()),
        }
    }

    /// Append an object if `admit` accepts it
    ///
    /// `admit` runs under the container lock, so whatever it checks cannot
    /// change before the object lands in the container.
    pub fn push_if<E>(
        &self,
        object: ObjectHandle,
        admit: impl FnOnce(&ObjectHandle) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut objects = self.lock();
        admit(&object)?;
        objects.push(object);
        Ok(())
    }

    /// Remove every entry identical to `object`, exiting each one first
    ///
    /// The membership claim is released even if `exit` panics. Returns the
    /// number of removed entries.
    pub fn remove(&self, object: &ObjectHandle) -> usize {
        let mut objects = self.lock();
        let before = objects.len();
        objects.retain(|held| {
            if Arc::ptr_eq(held, object) {
                exit_object(held);
                held.base().release(self.owner);
                false
            } else {
                true
            }
        });
        before - objects.len()
    }

    /// Stable-sort by poke priority, then poke enabled objects of `kind`
    ///
    /// The sorted order is kept. Returns the number of poked objects.
    pub fn poke(&self, kind: ObjectKind, system: SystemKind) -> usize {
        let mut objects = self.lock();

        // Priorities are atomics other threads may change mid-sort, so read
        // each key once.
        objects.sort_by_cached_key(|object| object.poke_priority());

        let mut poked = 0;
        for object in objects.iter() {
            if object.is_enabled() && object.kind() == kind {
                object.poke(system);
                poked += 1;
            }
        }
        poked
    }

    /// Exit every object and empty the container
    ///
    /// A failing or panicking object is logged and does not stop the rest;
    /// every object has its membership released.
    pub fn drain_exit(&self) -> DrainStats {
        let mut objects = self.lock();
        let mut stats = DrainStats::default();
        for object in objects.drain(..) {
            if !exit_object(&object) {
                stats.failed += 1;
            }
            object.base().release(self.owner);
            stats.exited += 1;
        }
        stats
    }

    /// Copy of the current handles, in container order
    pub fn snapshot(&self) -> Vec<ObjectHandle> {
        self.lock().clone()
    }

    /// Run `f` over the objects while holding the lock
    ///
    /// `f` must not call back into the owning scene.
    pub fn with_objects<R>(&self, f: impl FnOnce(&[ObjectHandle]) -> R) -> R {
        f(&self.lock())
    }

    /// Number of held objects
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the container is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ObjectHandle>> {
        // Every critical section leaves the vector valid, so a panic in an
        // object callback does not corrupt it.
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exit one object, logging failures; returns whether it exited cleanly
///
/// A panic inside `exit` is caught here so the caller can keep releasing
/// the remaining objects.
fn exit_object(object: &ObjectHandle) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| object.exit())) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            log::warn!(
                "Object '{}' ({}) failed to exit, continuing teardown: {}",
                object.name(),
                object.kind(),
                e
            );
            false
        }
        Err(payload) => {
            log::warn!(
                "Object '{}' ({}) panicked during exit, continuing teardown: {}",
                object.name(),
                object.kind(),
                panic_message(payload.as_ref())
            );
            false
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
