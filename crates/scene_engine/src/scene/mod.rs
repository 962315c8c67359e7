//! Scene management system
//!
//! Scenes host shared objects and push priority-ordered updates into the
//! engine's subsystems.
//!
//! ## Architecture
//!
//! ```text
//! Driver (loader / simulation threads)
//!      ↓  add_object / delete_object / poke_objects / exit
//! Scene (type gating + lifecycle)
//!      ↓
//! ObjectContainer (mutex-guarded, priority sorted)
//!      ↓  poke(system)
//! Objects → Graphics / Physics / Audio
//! ```
//!
//! ## Locking
//!
//! Each scene guards its objects with one non-reentrant lock, held for the
//! whole of every add, delete, poke and teardown. Object callbacks run under
//! that lock and must never call back into the same scene. A panic in `poke`
//! propagates to the caller but leaves the scene usable.

mod base;
mod container;
mod object;
mod observer;
mod scene2d;

#[cfg(test)]
mod tests;

pub use base::{Scene, SceneBase, SceneKind};
pub use container::{DrainStats, ObjectContainer};
pub use object::{ObjectBase, ObjectHandle, ObjectKind, ObjectKinds, SceneObject, SystemKind};
pub use observer::{ObserverHandle, SceneObserver};
pub use scene2d::{ContextSize, Scene2D};
