//! Scene trait and shared scene state

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use crate::error::{SceneError, SceneResult};
use crate::scene::object::{ObjectHandle, ObjectKind, ObjectKinds, SystemKind};
use crate::scene::observer::{ObserverHandle, ObserverList};

/// Scene flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SceneKind {
    /// Screen-space 2D scene
    Scene2D,
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Scene lifecycle position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lifecycle {
    Created,
    Initialized,
    /// The given thread is tearing the scene down
    Exiting(ThreadId),
    Exited,
}

/// Source of unique scene ids; 0 is reserved for "no scene"
static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);

/// State common to every scene flavor
pub struct SceneBase {
    id: u64,
    name: String,
    kind: SceneKind,
    supported: ObjectKinds,
    observers: ObserverList,
    lifecycle: Mutex<Lifecycle>,
    exit_done: Condvar,
}

impl SceneBase {
    /// Create scene state accepting the given object kinds
    pub fn new(name: impl Into<String>, kind: SceneKind, supported: ObjectKinds) -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            kind,
            supported,
            observers: ObserverList::new(),
            lifecycle: Mutex::new(Lifecycle::Created),
            exit_done: Condvar::new(),
        }
    }

    /// Process-unique scene id
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scene flavor
    pub const fn kind(&self) -> SceneKind {
        self.kind
    }

    /// Object kinds this scene accepts
    pub const fn supported_kinds(&self) -> ObjectKinds {
        self.supported
    }

    /// Whether this scene accepts the given object kind
    pub const fn supports(&self, kind: ObjectKind) -> bool {
        self.supported.supports(kind)
    }

    /// Register an unload observer
    pub fn attach_observer(&self, observer: ObserverHandle) {
        self.observers.attach(observer);
    }

    /// Unregister an observer by identity; returns whether it was registered
    pub fn detach_observer(&self, observer: &ObserverHandle) -> bool {
        self.observers.detach(observer)
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Whether `exit` has started; the scene admits no new objects
    pub fn is_exited(&self) -> bool {
        matches!(self.lifecycle(), Lifecycle::Exiting(_) | Lifecycle::Exited)
    }

    /// Move to the initialized state
    pub(crate) fn mark_initialized(&self) -> SceneResult<()> {
        let mut lifecycle = self.lock_lifecycle();
        match *lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Initialized => {
                log::error!("Scene '{}': init called twice", self.name);
                return Err(SceneError::AlreadyInitialized { scene: self.name.clone() });
            }
            Lifecycle::Exiting(_) | Lifecycle::Exited => {
                log::error!("Scene '{}': init called after exit", self.name);
                return Err(self.exited_error("init"));
            }
        }
        *lifecycle = Lifecycle::Initialized;
        log::info!("Scene '{}' ({}) initialized", self.name, self.kind);
        Ok(())
    }

    /// Claim the teardown
    ///
    /// The first caller gets a guard and must tear the scene down while
    /// holding it. Callers on other threads block until that guard is
    /// dropped, then get `None`. A call from the tearing-down thread itself,
    /// such as an observer exiting the scene from `on_unload`, gets `None`
    /// at once.
    pub(crate) fn begin_exit(&self) -> Option<ExitGuard<'_>> {
        let current = thread::current().id();
        let lifecycle = self.lock_lifecycle();
        let mut lifecycle = self
            .exit_done
            .wait_while(lifecycle, |state| matches!(state, Lifecycle::Exiting(owner) if *owner != current))
            .unwrap_or_else(PoisonError::into_inner);
        match *lifecycle {
            Lifecycle::Exiting(_) | Lifecycle::Exited => None,
            Lifecycle::Created | Lifecycle::Initialized => {
                *lifecycle = Lifecycle::Exiting(current);
                Some(ExitGuard { base: self })
            }
        }
    }

    pub(crate) fn notify_unload(&self) -> usize {
        self.observers.notify_unload()
    }

    /// Release scene-level resources and wake threads waiting in `begin_exit`
    fn finish_exit(&self) {
        self.observers.clear();
        *self.lock_lifecycle() = Lifecycle::Exited;
        self.exit_done.notify_all();
        log::info!("Scene '{}' ({}) exited", self.name, self.kind);
    }

    /// Fail with a fatal error unless the object kind is supported
    pub(crate) fn check_supported(&self, operation: &'static str, kind: ObjectKind) -> SceneResult<()> {
        if self.supports(kind) {
            return Ok(());
        }
        log::error!("Scene '{}': {} rejected unsupported object kind {}", self.name, operation, kind);
        Err(SceneError::UnsupportedObjectKind {
            scene: self.name.clone(),
            operation,
            kind,
        })
    }

    pub(crate) fn exited_error(&self, operation: &'static str) -> SceneError {
        SceneError::SceneExited { scene: self.name.clone(), operation }
    }

    pub(crate) fn lifecycle(&self) -> Lifecycle {
        *self.lock_lifecycle()
    }

    fn lock_lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SceneBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneBase")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("supported", &self.supported)
            .field("lifecycle", &self.lifecycle())
            .finish_non_exhaustive()
    }
}

/// Teardown in progress; finishes the exit when dropped, even on unwind
pub(crate) struct ExitGuard<'a> {
    base: &'a SceneBase,
}

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        self.base.finish_exit();
    }
}

/// Entry points a driver may call on a scene
///
/// All methods take `&self`; scenes are shared across threads behind an
/// `Arc` and guard their own state.
pub trait Scene: Send + Sync {
    /// Shared scene state
    fn base(&self) -> &SceneBase;

    /// Prepare the scene for use; call once before first use
    fn init(&self) -> SceneResult<()>;

    /// Tear the scene down
    ///
    /// Every contained object receives exactly one `exit` call and the
    /// container ends empty. A call racing an exit in progress returns once
    /// that teardown has finished. Later calls are no-ops.
    fn exit(&self);

    /// Add an object; its kind must be supported by this scene
    fn add_object(&self, object: ObjectHandle) -> SceneResult<()>;

    /// Remove an object by identity; absent objects are ignored
    fn delete_object(&self, object: &ObjectHandle);

    /// Poke enabled objects of `kind` in priority order
    ///
    /// Returns the number of poked objects. Unsupported kinds poke nothing.
    fn poke_objects(&self, kind: ObjectKind, system: SystemKind) -> usize;

    /// Scene name
    fn name(&self) -> &str {
        self.base().name()
    }

    /// Scene flavor
    fn kind(&self) -> SceneKind {
        self.base().kind()
    }

    /// Whether this scene accepts the given object kind
    fn supports(&self, kind: ObjectKind) -> bool {
        self.base().supports(kind)
    }
}
