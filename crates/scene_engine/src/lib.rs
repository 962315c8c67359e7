//! # Scene Engine
//!
//! Thread-guarded scene containers for the engine runtime.
//!
//! A scene owns a live collection of shared object handles, restricts which
//! object kinds it may host, and drives priority-ordered bulk updates
//! ("pokes") of those objects into downstream subsystems such as graphics,
//! physics and audio.
//!
//! ## Features
//!
//! - **Type Gating**: Scenes only accept the object kinds they were built for
//! - **Guarded Container**: Add/delete/poke are safe from any thread
//! - **Deterministic Ordering**: Stable priority sort on every poke
//! - **Atomic Teardown**: Every contained object is exited exactly once
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scene_engine::prelude::*;
//!
//! struct Sprite {
//!     base: ObjectBase,
//! }
//!
//! impl SceneObject for Sprite {
//!     fn base(&self) -> &ObjectBase {
//!         &self.base
//!     }
//!
//!     fn poke(&self, system: SystemKind) {
//!         println!("{} poked for {}", self.name(), system);
//!     }
//! }
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut props = Properties::new();
//!     props.set("context_x", 640);
//!     props.set("context_y", 480);
//!
//!     let scene = Scene2D::new("hud", &props);
//!     scene.init()?;
//!
//!     let sprite: ObjectHandle = Arc::new(Sprite {
//!         base: ObjectBase::new("cursor", ObjectKind::Image2D),
//!     });
//!     scene.add_object(sprite)?;
//!     scene.poke_objects(ObjectKind::Image2D, SystemKind::Graphics);
//!
//!     scene.exit();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

// Core engine modules
pub mod core;

pub mod config;
pub mod error;
pub mod foundation;
pub mod scene;

pub use error::{ObjectError, SceneError, SceneResult};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigFormat, Properties, PropertyValue},
        core::config::{ApplicationConfig, LoggingConfig, Scene2DConfig},
        error::{ObjectError, SceneError, SceneResult},
        scene::{
            ContextSize, ObjectBase, ObjectHandle, ObjectKind, ObjectKinds, ObserverHandle,
            Scene, Scene2D, SceneKind, SceneObject, SceneObserver, SystemKind,
        },
    };
}
