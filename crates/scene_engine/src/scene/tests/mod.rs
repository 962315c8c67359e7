//! Scenario tests for scenes shared between threads


use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use crate::error::ObjectError;
use crate::scene::{ObjectBase, ObjectKind, SceneObject, SceneObserver, SystemKind};

/// Shared record of callbacks, in call order
pub(super) type EventLog = Arc<Mutex<Vec<String>>>;

pub(super) fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub(super) fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

/// How a [`TrackedObject`] misbehaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Fault {
    None,
    /// `exit` returns an error
    FailExit,
    /// `exit` panics
    PanicExit,
    /// `exit` sleeps before returning
    SlowExit(Duration),
    /// The first `poke` panics, later ones succeed
    PanicOnFirstPoke,
}

/// Object recording pokes and exits
pub(super) struct TrackedObject {
    pub base: ObjectBase,
    pub pokes: AtomicUsize,
    pub exits: AtomicUsize,
    fault: Fault,
    poke_panicked: AtomicBool,
    log: EventLog,
}

impl TrackedObject {
    pub fn new(name: &str, kind: ObjectKind, priority: i32, log: &EventLog) -> Arc<Self> {
        Self::with_fault(name, kind, priority, Fault::None, log)
    }

    pub fn with_fault(name: &str, kind: ObjectKind, priority: i32, fault: Fault, log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            base: ObjectBase::new(name, kind).with_priority(priority),
            pokes: AtomicUsize::new(0),
            exits: AtomicUsize::new(0),
            fault,
            poke_panicked: AtomicBool::new(false),
            log: Arc::clone(log),
        })
    }

    pub fn image(name: &str, priority: i32, log: &EventLog) -> Arc<Self> {
        Self::new(name, ObjectKind::Image2D, priority, log)
    }

    pub fn failing(name: &str, log: &EventLog) -> Arc<Self> {
        Self::with_fault(name, ObjectKind::Image2D, 0, Fault::FailExit, log)
    }

    pub fn panicking(name: &str, log: &EventLog) -> Arc<Self> {
        Self::with_fault(name, ObjectKind::Image2D, 0, Fault::PanicExit, log)
    }

    pub fn slow(name: &str, delay: Duration, log: &EventLog) -> Arc<Self> {
        Self::with_fault(name, ObjectKind::Image2D, 0, Fault::SlowExit(delay), log)
    }

    pub fn pokes(&self) -> usize {
        self.pokes.load(Ordering::SeqCst)
    }

    pub fn exits(&self) -> usize {
        self.exits.load(Ordering::SeqCst)
    }
}

impl SceneObject for TrackedObject {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn poke(&self, system: SystemKind) {
        if self.fault == Fault::PanicOnFirstPoke && !self.poke_panicked.swap(true, Ordering::SeqCst) {
            panic!("{} lost its texture mid-frame", self.name());
        }
        self.pokes.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap_or_else(PoisonError::into_inner).push(format!("poke:{}:{}", self.name(), system));
    }

    fn exit(&self) -> Result<(), ObjectError> {
        self.exits.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap_or_else(PoisonError::into_inner).push(format!("exit:{}", self.name()));
        match self.fault {
            Fault::FailExit => Err(ObjectError::Teardown(format!("{} holds a lost texture", self.name()))),
            Fault::PanicExit => panic!("{} panicked while releasing its texture", self.name()),
            Fault::SlowExit(delay) => {
                thread::sleep(delay);
                Ok(())
            }
            Fault::None | Fault::PanicOnFirstPoke => Ok(()),
        }
    }
}

/// Observer recording unload notifications
pub(super) struct TrackedObserver {
    name: String,
    pub unloads: AtomicUsize,
    log: EventLog,
}

impl TrackedObserver {
    pub fn new(name: &str, log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            unloads: AtomicUsize::new(0),
            log: Arc::clone(log),
        })
    }

    pub fn unloads(&self) -> usize {
        self.unloads.load(Ordering::SeqCst)
    }
}

impl SceneObserver for TrackedObserver {
    fn on_unload(&self) {
        self.unloads.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap_or_else(PoisonError::into_inner).push(format!("unload:{}", self.name));
    }
}
