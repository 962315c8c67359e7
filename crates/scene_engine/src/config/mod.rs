//! Configuration system
//!
//! File-backed configuration through the [`Config`] trait, and the loose
//! key-value [`Properties`] bundle scenes read their settings from.

pub use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// On-disk encoding of a configuration file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    fn decode<T: for<'de> Deserialize<'de>>(self, text: &str) -> Result<T, String> {
        match self {
            Self::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            Self::Ron => ron::from_str(text).map_err(|e| e.to_string()),
        }
    }

    fn encode<T: Serialize>(self, value: &T) -> Result<String, String> {
        match self {
            Self::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
                .map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Ron => "RON",
        })
    }
}

/// A settings type that can be read from and written to a `.toml` or `.ron`
/// file
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Read settings from `path`
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = format.decode(&text).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        })?;
        log::debug!("Loaded {} config from {}", format, path.display());
        Ok(config)
    }

    /// Write settings to `path`, replacing any existing file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = format
            .encode(self)
            .map_err(|message| ConfigError::Serialize { format, message })?;

        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Failures reading, writing or validating settings
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read or written
    #[error("cannot access config file {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The file contents are not valid for the settings type
    #[error("malformed {format} config {}: {message}", path.display())]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Encoding it was read as
        format: ConfigFormat,
        /// Decoder message
        message: String,
    },

    /// The settings could not be encoded
    #[error("cannot encode settings as {format}: {message}")]
    Serialize {
        /// Target encoding
        format: ConfigFormat,
        /// Encoder message
        message: String,
    },

    /// The file extension is neither `.toml` nor `.ron`
    #[error("unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Value failed validation
    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// A single configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Free-form text
    Text(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Key-value configuration bundle
///
/// Lookups never fail: a missing or malformed key yields the caller's
/// default. Malformed values are reported through the log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    values: BTreeMap<String, PropertyValue>,
}

impl Properties {
    /// Create an empty property bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get the raw value for a key
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    /// Whether the key is present
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bundle is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Integer lookup; text values are parsed
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            None => default,
            Some(PropertyValue::Int(v)) => *v,
            Some(PropertyValue::Text(text)) => text.trim().parse().unwrap_or_else(|_| {
                log::warn!("Property '{}' = '{}' is not an integer, using {}", key, text, default);
                default
            }),
            Some(other) => {
                log::warn!("Property '{}' = '{}' is not an integer, using {}", key, other, default);
                default
            }
        }
    }

    /// Boolean lookup; text values "true"/"false" are parsed
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            None => default,
            Some(PropertyValue::Bool(v)) => *v,
            Some(PropertyValue::Text(text)) => text.trim().parse().unwrap_or_else(|_| {
                log::warn!("Property '{}' = '{}' is not a boolean, using {}", key, text, default);
                default
            }),
            Some(other) => {
                log::warn!("Property '{}' = '{}' is not a boolean, using {}", key, other, default);
                default
            }
        }
    }

    /// String lookup; any value is rendered as text
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .map_or_else(|| default.to_string(), ToString::to_string)
    }

    /// Iterate over all properties in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Config for Properties {}
