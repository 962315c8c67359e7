//! # Core Module
//!
//! Shared abstractions used throughout the scene engine.
//!
//! ## Organization
//!
//! - **Config**: Typed configuration for scenes and hosting applications

pub mod config;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    LoggingConfig,
    Scene2DConfig,
};
pub use crate::config::{Config, ConfigError, Properties};
