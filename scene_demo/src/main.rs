//! Scene demo application
//!
//! Drives a 2D scene from two threads: a loader adding sprites with random
//! priorities and a simulation loop poking the graphics subsystem. The scene
//! is torn down once both finish.
//!
//! Usage: `scene_demo [config.toml|config.ron]`

mod sprite;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rand::Rng;
use scene_engine::foundation::logging;
use scene_engine::prelude::*;
use thiserror::Error;

use sprite::{Sprite, UnloadLogger};

const SPRITE_COUNT: usize = 64;
const FRAMES: usize = 120;
const FRAME_TIME: Duration = Duration::from_millis(2);

/// Demo errors
#[derive(Error, Debug)]
enum DemoError {
    /// Scene error
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Config error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Worker thread panicked
    #[error("Worker thread '{0}' panicked")]
    Worker(&'static str),
}

fn load_config() -> Result<ApplicationConfig, ConfigError> {
    match std::env::args_os().nth(1) {
        Some(path) => ApplicationConfig::load_from_file(path),
        None => Ok(ApplicationConfig::default()),
    }
}

fn run(config: &ApplicationConfig) -> Result<(), DemoError> {
    let scene = Arc::new(Scene2D::from_config(config.scene_name.as_str(), &config.context));
    scene.init()?;
    scene.attach_observer(Arc::new(UnloadLogger { label: "renderer".to_string() }));

    let size = scene.context_size();
    log::info!(
        "Scene '{}' ready: {}x{} @ {} bpp",
        scene.name(),
        size.width,
        size.height,
        size.bpp
    );

    let loader = {
        let scene = Arc::clone(&scene);
        thread::spawn(move || -> Result<Vec<Arc<Sprite>>, SceneError> {
            let mut rng = rand::thread_rng();
            let mut sprites = Vec::with_capacity(SPRITE_COUNT);
            for i in 0..SPRITE_COUNT {
                let sprite = Sprite::new(format!("sprite{i}"), rng.gen_range(0..8));
                if i % 10 == 9 {
                    sprite.set_enabled(false);
                }
                scene.add_object(sprite.clone())?;
                sprites.push(sprite);
                thread::sleep(FRAME_TIME / 2);
            }
            Ok(sprites)
        })
    };

    let simulation = {
        let scene = Arc::clone(&scene);
        thread::spawn(move || {
            let mut total = 0;
            for _ in 0..FRAMES {
                total += scene.poke_objects(ObjectKind::Image2D, SystemKind::Graphics);
                // Vacuous for a 2D scene
                total += scene.poke_objects(ObjectKind::Geometry, SystemKind::Physics);
                thread::sleep(FRAME_TIME);
            }
            total
        })
    };

    let sprites = loader.join().map_err(|_| DemoError::Worker("loader"))??;
    let poked = simulation.join().map_err(|_| DemoError::Worker("simulation"))?;

    // Retire a few sprites before shutdown
    for sprite in sprites.iter().take(4) {
        let handle: ObjectHandle = sprite.clone();
        scene.delete_object(&handle);
    }
    log::info!("{} objects remain after deletes", scene.object_count());

    scene.exit();

    let draws: u64 = sprites.iter().map(|s| s.draws()).sum();
    log::info!(
        "Simulated {} frames: {} pokes ({} sprite draws), scene exited: {}",
        FRAMES,
        poked,
        draws,
        scene.is_exited()
    );
    Ok(())
}

fn start() -> Result<(), DemoError> {
    let config = load_config()?;
    logging::init_with_level(&config.logging.log_level);
    config.validate()?;

    log::info!("Starting scene demo");
    run(&config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = start() {
        log::error!("Scene demo failed: {}", e);
        return Err(e.into());
    }
    log::info!("Scene demo finished successfully");
    Ok(())
}
