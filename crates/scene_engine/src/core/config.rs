//! # Scene Configuration
//!
//! Typed configuration for scenes and the applications that drive them.
//!
//! ## Configuration Categories
//!
//! - **Scene2D Config**: Surface description (width, height, bit depth)
//! - **Logging Config**: Log level applied at startup
//! - **Application Config**: Top-level bundle loaded from TOML or RON

use serde::{Serialize, Deserialize};

use crate::config::{Config, ConfigError, Properties};

/// Default surface width in pixels
pub const DEFAULT_CONTEXT_X: i32 = 1280;
/// Default surface height in pixels
pub const DEFAULT_CONTEXT_Y: i32 = 720;
/// Default surface bit depth
pub const DEFAULT_CONTEXT_BPP: i32 = 32;

const fn default_context_x() -> i32 {
    DEFAULT_CONTEXT_X
}

const fn default_context_y() -> i32 {
    DEFAULT_CONTEXT_Y
}

const fn default_context_bpp() -> i32 {
    DEFAULT_CONTEXT_BPP
}

/// # Scene2D Configuration
///
/// Describes the 2D surface a [`Scene2D`](crate::scene::Scene2D) renders to.
/// Keys match the property names read from a [`Properties`] bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene2DConfig {
    /// Surface width in pixels
    #[serde(default = "default_context_x")]
    pub context_x: i32,
    /// Surface height in pixels
    #[serde(default = "default_context_y")]
    pub context_y: i32,
    /// Bits per pixel
    #[serde(default = "default_context_bpp")]
    pub context_bpp: i32,
}

impl Scene2DConfig {
    /// Create a new surface configuration
    pub const fn new(context_x: i32, context_y: i32, context_bpp: i32) -> Self {
        Self { context_x, context_y, context_bpp }
    }

    /// Read the surface keys from a property bundle, defaulting absent keys
    pub fn from_properties(props: &Properties) -> Self {
        Self {
            context_x: clamp_i32(props.get_int("context_x", i64::from(DEFAULT_CONTEXT_X)), DEFAULT_CONTEXT_X),
            context_y: clamp_i32(props.get_int("context_y", i64::from(DEFAULT_CONTEXT_Y)), DEFAULT_CONTEXT_Y),
            context_bpp: clamp_i32(props.get_int("context_bpp", i64::from(DEFAULT_CONTEXT_BPP)), DEFAULT_CONTEXT_BPP),
        }
    }

    /// Write the surface keys into a property bundle
    pub fn to_properties(&self) -> Properties {
        let mut props = Properties::new();
        props.set("context_x", self.context_x);
        props.set("context_y", self.context_y);
        props.set("context_bpp", self.context_bpp);
        props
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.context_x <= 0 || self.context_y <= 0 {
            return Err(ConfigError::Invalid(format!(
                "context size must be positive, got {}x{}",
                self.context_x, self.context_y
            )));
        }

        if self.context_bpp <= 0 {
            return Err(ConfigError::Invalid(format!(
                "context bpp must be positive, got {}",
                self.context_bpp
            )));
        }

        Ok(())
    }
}

impl Default for Scene2DConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_X, DEFAULT_CONTEXT_Y, DEFAULT_CONTEXT_BPP)
    }
}

fn clamp_i32(value: i64, default: i32) -> i32 {
    i32::try_from(value).unwrap_or_else(|_| {
        log::warn!("Config value {} out of range, using {}", value, default);
        default
    })
}

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter ("error", "warn", "info", "debug", "trace")
    pub log_level: String,
}

impl LoggingConfig {
    /// Create a logging configuration with the given level
    pub fn new(level: impl Into<String>) -> Self {
        Self { log_level: level.into() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration for an application hosting a single 2D scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Name given to the scene
    #[serde(default = "default_scene_name")]
    pub scene_name: String,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Surface configuration
    #[serde(default)]
    pub context: Scene2DConfig,
}

fn default_scene_name() -> String {
    "scene2d".to_string()
}

impl ApplicationConfig {
    /// Create a new application configuration with defaults
    pub fn new(scene_name: impl Into<String>) -> Self {
        Self {
            scene_name: scene_name.into(),
            logging: LoggingConfig::default(),
            context: Scene2DConfig::default(),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scene_name.is_empty() {
            return Err(ConfigError::Invalid("scene name cannot be empty".to_string()));
        }
        self.context.validate()
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self::new(default_scene_name())
    }
}

impl Config for ApplicationConfig {}
