//! Scene object contract
//!
//! Objects are shared between the scene that hosts them and whatever else
//! in the engine holds a handle. Scenes only touch objects through the
//! [`SceneObject`] trait.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};
use std::sync::Arc;

use bitflags::bitflags;

use crate::error::ObjectError;

/// Object category used for scene type gating and poke filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Camera
    Camera,
    /// Screen-space image
    Image2D,
    /// 3D geometry
    Geometry,
    /// Skybox
    Skybox,
    /// Light source
    Light,
    /// Physics joint
    Joint,
    /// Audio listener
    AudioReceiver,
}

impl ObjectKind {
    /// All object kinds
    pub const ALL: [Self; 7] = [
        Self::Camera,
        Self::Image2D,
        Self::Geometry,
        Self::Skybox,
        Self::Light,
        Self::Joint,
        Self::AudioReceiver,
    ];

    /// Single-kind flag set
    pub const fn flag(self) -> ObjectKinds {
        match self {
            Self::Camera => ObjectKinds::CAMERA,
            Self::Image2D => ObjectKinds::IMAGE_2D,
            Self::Geometry => ObjectKinds::GEOMETRY,
            Self::Skybox => ObjectKinds::SKYBOX,
            Self::Light => ObjectKinds::LIGHT,
            Self::Joint => ObjectKinds::JOINT,
            Self::AudioReceiver => ObjectKinds::AUDIO_RECEIVER,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

bitflags! {
    /// Set of object kinds a scene accepts
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObjectKinds: u32 {
        /// Camera
        const CAMERA = 1 << 0;
        /// Screen-space image
        const IMAGE_2D = 1 << 1;
        /// 3D geometry
        const GEOMETRY = 1 << 2;
        /// Skybox
        const SKYBOX = 1 << 3;
        /// Light source
        const LIGHT = 1 << 4;
        /// Physics joint
        const JOINT = 1 << 5;
        /// Audio listener
        const AUDIO_RECEIVER = 1 << 6;
    }
}

impl ObjectKinds {
    /// Whether the set contains the given kind
    pub const fn supports(self, kind: ObjectKind) -> bool {
        self.contains(kind.flag())
    }
}

impl From<ObjectKind> for ObjectKinds {
    fn from(kind: ObjectKind) -> Self {
        kind.flag()
    }
}

impl FromIterator<ObjectKind> for ObjectKinds {
    fn from_iter<I: IntoIterator<Item = ObjectKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, kind| set | kind.flag())
    }
}

/// Downstream subsystem a poke is directed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemKind {
    /// Rendering
    Graphics,
    /// Physics simulation
    Physics,
    /// Audio mixing
    Audio,
    /// Input handling
    Input,
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Identifier meaning "not held by any scene"
const NO_SCENE: u64 = 0;

/// State shared by every scene object
///
/// Embed this in concrete objects and return it from [`SceneObject::base`].
/// The enabled flag and poke priority may be changed from any thread while
/// scenes poke the object.
#[derive(Debug)]
pub struct ObjectBase {
    name: String,
    kind: ObjectKind,
    enabled: AtomicBool,
    poke_priority: AtomicI32,
    owner: AtomicU64,
}

impl ObjectBase {
    /// Create an enabled object with priority 0
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            enabled: AtomicBool::new(true),
            poke_priority: AtomicI32::new(0),
            owner: AtomicU64::new(NO_SCENE),
        }
    }

    /// Set the initial poke priority (builder pattern)
    #[must_use]
    pub fn with_priority(self, priority: i32) -> Self {
        self.poke_priority.store(priority, Ordering::Relaxed);
        self
    }

    /// Object name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Object kind
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Whether pokes reach this object
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Enable or disable the object
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Poke priority; lower values are poked first
    pub fn poke_priority(&self) -> i32 {
        self.poke_priority.load(Ordering::Acquire)
    }

    /// Change the poke priority; takes effect on the next poke
    pub fn set_poke_priority(&self, priority: i32) {
        self.poke_priority.store(priority, Ordering::Release);
    }

    /// Whether a scene container currently holds this object
    pub fn in_scene(&self) -> bool {
        self.owner.load(Ordering::Acquire) != NO_SCENE
    }

    /// Claim the membership slot for a scene; fails if any scene holds it
    pub(crate) fn claim(&self, scene_id: u64) -> bool {
        self.owner
            .compare_exchange(NO_SCENE, scene_id, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Release the membership slot if the given scene holds it
    pub(crate) fn release(&self, scene_id: u64) {
        let _ = self
            .owner
            .compare_exchange(scene_id, NO_SCENE, Ordering::AcqRel, Ordering::Acquire);
    }
}

/// Object hosted by a scene
///
/// # Reentrancy
///
/// [`poke`](Self::poke) and [`exit`](Self::exit) run while the hosting
/// scene holds its container lock. Implementations must not call back into
/// the same scene's `add_object`, `delete_object` or `poke_objects`; the
/// lock is not reentrant and doing so deadlocks.
pub trait SceneObject: Send + Sync {
    /// Shared object state
    fn base(&self) -> &ObjectBase;

    /// Run this object's update step for a subsystem
    fn poke(&self, system: SystemKind);

    /// Release the object's scene resources
    ///
    /// Called exactly once when the object leaves a scene. Errors and
    /// panics are logged by the scene and do not stop the teardown of other
    /// objects.
    fn exit(&self) -> Result<(), ObjectError> {
        Ok(())
    }

    /// Object name
    fn name(&self) -> &str {
        self.base().name()
    }

    /// Object kind
    fn kind(&self) -> ObjectKind {
        self.base().kind()
    }

    /// Whether pokes reach this object
    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    /// Poke priority; lower values are poked first
    fn poke_priority(&self) -> i32 {
        self.base().poke_priority()
    }
}

/// Shared handle to a scene object
pub type ObjectHandle = Arc<dyn SceneObject>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_flags_are_distinct() {
        let all: ObjectKinds = ObjectKind::ALL.into_iter().collect();
        assert_eq!(all, ObjectKinds::all());
        assert_eq!(all.bits().count_ones() as usize, ObjectKind::ALL.len());
    }

    #[test]
    fn test_supports() {
        let kinds = ObjectKinds::from(ObjectKind::Image2D);
        assert!(kinds.supports(ObjectKind::Image2D));
        assert!(!kinds.supports(ObjectKind::Geometry));
        assert!(!ObjectKinds::empty().supports(ObjectKind::Camera));
    }

    #[test]
    fn test_base_flags() {
        let base = ObjectBase::new("logo", ObjectKind::Image2D).with_priority(3);
        assert_eq!(base.name(), "logo");
        assert!(base.is_enabled());
        assert_eq!(base.poke_priority(), 3);

        base.set_enabled(false);
        base.set_poke_priority(-1);
        assert!(!base.is_enabled());
        assert_eq!(base.poke_priority(), -1);
    }

    #[test]
    fn test_membership_is_exclusive() {
        let base = ObjectBase::new("logo", ObjectKind::Image2D);
        assert!(base.claim(1));
        assert!(!base.claim(2));
        assert!(!base.claim(1));

        // Only the holder can release
        base.release(2);
        assert!(base.in_scene());
        base.release(1);
        assert!(!base.in_scene());
        assert!(base.claim(2));
    }
}
