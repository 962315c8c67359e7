//! Demo scene objects

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use scene_engine::prelude::*;

/// Image object counting the pokes it receives per subsystem
pub struct Sprite {
    base: ObjectBase,
    draws: AtomicU64,
    other: AtomicU64,
}

impl Sprite {
    pub fn new(name: impl Into<String>, priority: i32) -> Arc<Self> {
        Arc::new(Self {
            base: ObjectBase::new(name, ObjectKind::Image2D).with_priority(priority),
            draws: AtomicU64::new(0),
            other: AtomicU64::new(0),
        })
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.base.set_enabled(enabled);
    }

    pub fn draws(&self) -> u64 {
        self.draws.load(Ordering::Relaxed)
    }
}

impl SceneObject for Sprite {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn poke(&self, system: SystemKind) {
        match system {
            SystemKind::Graphics => self.draws.fetch_add(1, Ordering::Relaxed),
            _ => self.other.fetch_add(1, Ordering::Relaxed),
        };
    }

    fn exit(&self) -> Result<(), ObjectError> {
        log::trace!(
            "Sprite '{}' exiting after {} draws and {} other pokes",
            self.name(),
            self.draws(),
            self.other.load(Ordering::Relaxed)
        );
        Ok(())
    }
}

/// Observer logging scene unloads
pub struct UnloadLogger {
    pub label: String,
}

impl SceneObserver for UnloadLogger {
    fn on_unload(&self) {
        log::info!("{}: scene unloaded", self.label);
    }
}
