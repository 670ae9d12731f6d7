use thiserror::Error;

/// Unified error type for civersion operations
#[derive(Error, Debug)]
pub enum CiVersionError {
    #[error("Invalid version: '{value}' is not a valid semantic version")]
    InvalidVersion {
        value: String,
        #[source]
        source: semver::Error,
    },

    #[error("Version overflow: cannot increment '{0}' any further")]
    VersionOverflow(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid pre-release label: '{0}'")]
    InvalidLabel(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in civersion
pub type Result<T> = std::result::Result<T, CiVersionError>;

impl CiVersionError {
    /// Create an invalid version error for the offending input
    pub fn invalid_version(value: impl Into<String>, source: semver::Error) -> Self {
        CiVersionError::InvalidVersion {
            value: value.into(),
            source,
        }
    }

    /// Create an overflow error for a version that cannot be bumped
    pub fn version_overflow(version: impl Into<String>) -> Self {
        CiVersionError::VersionOverflow(version.into())
    }

    /// Create an invalid configuration error with context
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        CiVersionError::InvalidConfiguration(msg.into())
    }

    /// Create an invalid label error
    pub fn invalid_label(label: impl Into<String>) -> Self {
        CiVersionError::InvalidLabel(label.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        CiVersionError::Config(msg.into())
    }
}
