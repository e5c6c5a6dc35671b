//! Error types for pkgcfg.

use thiserror::Error;

/// Message surfaced when an active source is assigned that the registry does not know.
pub const ACTIVE_SOURCE_NOT_AVAILABLE: &str =
    "The package source does not belong to the collection of available sources.";

/// A shared error type for the whole workspace.
///
/// Store failures from collaborators are converted once at the boundary and then
/// propagated unchanged; nothing in pkgcfg retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PkgcfgError {
    /// A caller passed an argument that cannot be accepted.
    #[error("{message} (parameter '{param}')")]
    InvalidArgument { param: &'static str, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "XML"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File lock could not be acquired
    #[error("Lock error: {0}")]
    Lock(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PkgcfgError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidArgument error for the named parameter
    pub fn invalid_argument(param: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param,
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Serialization error
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an InvalidArgument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Name of the offending parameter, for `InvalidArgument` errors.
    pub fn param_name(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { param, .. } => Some(param),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PkgcfgError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<toml::de::Error> for PkgcfgError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization("TOML", err.to_string())
    }
}

impl From<toml::ser::Error> for PkgcfgError {
    fn from(err: toml::ser::Error) -> Self {
        Self::serialization("TOML", err.to_string())
    }
}

impl From<quick_xml::DeError> for PkgcfgError {
    fn from(err: quick_xml::DeError) -> Self {
        Self::serialization("XML", err.to_string())
    }
}

impl From<semver::Error> for PkgcfgError {
    fn from(err: semver::Error) -> Self {
        Self::Config(format!("Invalid schema version: {}", err))
    }
}

/// A type alias for `Result<T, PkgcfgError>`.
pub type Result<T> = std::result::Result<T, PkgcfgError>;
