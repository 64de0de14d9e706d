//! Error types for ldlog

use std::path::PathBuf;

/// ldlog error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Path rejected: {0}")]
    PathRejected(String),

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("Lock unavailable: {0}")]
    LockUnavailable(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for ldlog
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }

    pub fn path_rejected<S: Into<String>>(path: S) -> Self {
        Error::PathRejected(path.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidTimezone("Invalid/Zone".to_string());
        assert_eq!(err.to_string(), "Unknown timezone: Invalid/Zone");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_path_rejected_helper() {
        let err = Error::path_rejected("../../etc/passwd");
        assert_eq!(err.to_string(), "Path rejected: ../../etc/passwd");
    }
}
