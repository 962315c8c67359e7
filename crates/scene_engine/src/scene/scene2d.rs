//! 2D scene
//!
//! A screen-space scene hosting image objects on a fixed-size surface.

use std::fmt;

use crate::config::Properties;
use crate::core::config::Scene2DConfig;
use crate::error::{SceneError, SceneResult};
use crate::scene::base::{Scene, SceneBase, SceneKind};
use crate::scene::container::ObjectContainer;
use crate::scene::object::{ObjectHandle, ObjectKind, ObjectKinds, SceneObject, SystemKind};
use crate::scene::observer::ObserverHandle;

/// Surface description of a 2D scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextSize {
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Bits per pixel
    pub bpp: i32,
}

impl From<Scene2DConfig> for ContextSize {
    fn from(config: Scene2DConfig) -> Self {
        Self {
            width: config.context_x,
            height: config.context_y,
            bpp: config.context_bpp,
        }
    }
}

/// Screen-space scene accepting [`ObjectKind::Image2D`] objects
///
/// Share it between threads behind an `Arc`; every operation guards its own
/// state. Dropping a scene that was never exited runs the teardown.
pub struct Scene2D {
    base: SceneBase,
    objects: ObjectContainer,
    context: ContextSize,
}

impl Scene2D {
    /// Object kinds a 2D scene accepts
    pub const SUPPORTED_KINDS: ObjectKinds = ObjectKinds::IMAGE_2D;

    /// Create a scene reading `context_x`, `context_y` and `context_bpp`
    /// from a property bundle (defaults 1280, 720, 32)
    pub fn new(name: impl Into<String>, config: &Properties) -> Self {
        Self::from_config(name, &Scene2DConfig::from_properties(config))
    }

    /// Create a scene from a typed surface configuration
    pub fn from_config(name: impl Into<String>, config: &Scene2DConfig) -> Self {
        let base = SceneBase::new(name, SceneKind::Scene2D, Self::SUPPORTED_KINDS);
        let objects = ObjectContainer::new(base.id());
        let context = ContextSize::from(*config);
        log::debug!(
            "Created scene '{}' with context {}x{}x{}",
            base.name(),
            context.width,
            context.height,
            context.bpp
        );

        Self { base, objects, context }
    }

    /// Surface width, height and bit depth as configured at construction
    pub const fn context_size(&self) -> ContextSize {
        self.context
    }

    /// Copy of the contained object handles, in current poke order
    pub fn objects(&self) -> Vec<ObjectHandle> {
        self.objects.snapshot()
    }

    /// Run `f` over the contained objects under the container lock
    ///
    /// `f` must not call back into this scene.
    pub fn with_objects<R>(&self, f: impl FnOnce(&[ObjectHandle]) -> R) -> R {
        self.objects.with_objects(f)
    }

    /// Number of contained objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Register an unload observer
    pub fn attach_observer(&self, observer: ObserverHandle) {
        self.base.attach_observer(observer);
    }

    /// Unregister an observer; returns whether it was registered
    pub fn detach_observer(&self, observer: &ObserverHandle) -> bool {
        self.base.detach_observer(observer)
    }

    /// Whether `exit` has started
    pub fn is_exited(&self) -> bool {
        self.base.is_exited()
    }
}

impl Scene for Scene2D {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn init(&self) -> SceneResult<()> {
        self.base.mark_initialized()
    }

    fn exit(&self) {
        let Some(_exiting) = self.base.begin_exit() else {
            log::debug!("Scene '{}' already exited", self.base.name());
            return;
        };

        let stats = self.objects.drain_exit();
        if stats.failed > 0 {
            log::warn!(
                "Scene '{}': {} of {} objects failed to exit",
                self.base.name(),
                stats.failed,
                stats.exited
            );
        }

        let notified = self.base.notify_unload();
        log::debug!(
            "Scene '{}' released {} objects, notified {} observers",
            self.base.name(),
            stats.exited,
            notified
        );
    }

    fn add_object(&self, object: ObjectHandle) -> SceneResult<()> {
        let kind = object.kind();
        self.base.check_supported("add_object", kind)?;

        let scene_id = self.base.id();
        self.objects.push_if(object, |object| {
            if self.base.is_exited() {
                log::error!("Scene '{}': add_object called after exit", self.base.name());
                return Err(self.base.exited_error("add_object"));
            }
            if !object.base().claim(scene_id) {
                log::error!(
                    "Scene '{}': object '{}' already belongs to a scene",
                    self.base.name(),
                    object.name()
                );
                return Err(SceneError::ObjectAlreadyOwned {
                    scene: self.base.name().to_string(),
                    object: object.name().to_string(),
                    kind,
                });
            }
            log::debug!("Scene '{}': added '{}' ({})", self.base.name(), object.name(), kind);
            Ok(())
        })
    }

    fn delete_object(&self, object: &ObjectHandle) {
        let removed = self.objects.remove(object);
        if removed > 0 {
            log::debug!("Scene '{}': deleted '{}'", self.base.name(), object.name());
        }
    }

    fn poke_objects(&self, kind: ObjectKind, system: SystemKind) -> usize {
        if !self.base.supports(kind) {
            return 0;
        }
        let poked = self.objects.poke(kind, system);
        log::trace!("Scene '{}': poked {} {} objects for {}", self.base.name(), poked, kind, system);
        poked
    }
}

impl Drop for Scene2D {
    fn drop(&mut self) {
        if !self.base.is_exited() {
            log::warn!("Scene '{}' dropped without exit, tearing down", self.base.name());
            self.exit();
        }
    }
}

impl fmt::Debug for Scene2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene2D")
            .field("base", &self.base)
            .field("context", &self.context)
            .field("objects", &self.objects.len())
            .finish()
    }
}
