//! Scene error types

use crate::config::ConfigError;
use crate::scene::ObjectKind;
use thiserror::Error;

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Scene-level errors
///
/// Every variant except [`SceneError::Config`] signals a caller or
/// configuration mistake rather than a recoverable runtime state.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene was asked to host an object kind it was never configured for
    #[error("Scene '{scene}': {operation} rejected object kind {kind} (not supported)")]
    UnsupportedObjectKind {
        /// Scene name
        scene: String,
        /// Operation that rejected the object
        operation: &'static str,
        /// Offending object kind
        kind: ObjectKind,
    },

    /// The object is already held by a scene container
    #[error("Scene '{scene}': object '{object}' of kind {kind} already belongs to a scene")]
    ObjectAlreadyOwned {
        /// Scene name
        scene: String,
        /// Object name
        object: String,
        /// Object kind
        kind: ObjectKind,
    },

    /// `init` was called on a scene that is already initialized or exited
    #[error("Scene '{scene}' already initialized")]
    AlreadyInitialized {
        /// Scene name
        scene: String,
    },

    /// A mutating operation reached a scene after teardown
    #[error("Scene '{scene}': {operation} called after exit")]
    SceneExited {
        /// Scene name
        scene: String,
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl SceneError {
    /// Whether this error is a fatal programming/configuration error
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}

/// Errors reported by an object's own teardown
///
/// Scenes log these and keep tearing down the remaining objects.
#[derive(Error, Debug)]
pub enum ObjectError {
    /// Releasing the object's resources failed
    #[error("Teardown failed: {0}")]
    Teardown(String),

    /// Custom object error
    #[error("Object error: {0}")]
    Custom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_kind_message_names_operation_and_kind() {
        let err = SceneError::UnsupportedObjectKind {
            scene: "hud".to_string(),
            operation: "add_object",
            kind: ObjectKind::Geometry,
        };

        let message = err.to_string();
        assert!(message.contains("hud"));
        assert!(message.contains("add_object"));
        assert!(message.contains("Geometry"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_config_errors_are_not_fatal() {
        let err = SceneError::from(ConfigError::UnsupportedFormat("scene.ini".into()));
        assert!(!err.is_fatal());
    }
}
