//! Foundation module - Core utilities
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Logging utilities

pub mod logging;
