//! Error types for the tshub-core crate.
//!
//! This module provides [`ConfigError`] for configuration loading and
//! validation, and [`MetadataError`] for reading host metadata documents.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use tshub_core::ConfigError;
///
/// let error = ConfigError::InvalidOption {
///     option: "types_dir".to_owned(),
///     reason: "must not be empty".to_owned(),
/// };
/// assert!(error.to_string().contains("types_dir"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// The configuration file that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while loading a host metadata document.
///
/// These are failures of the input artifact itself. Structural problems found
/// during translation are reported by the code generator instead.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The metadata file does not exist.
    #[error("metadata file not found: {0}")]
    NotFound(Utf8PathBuf),

    /// The metadata file could not be read.
    #[error("failed to read metadata {path}: {source}")]
    Read {
        /// The metadata file path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The metadata document is not valid JSON for the expected schema.
    #[error("failed to parse metadata: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two type definitions share the same fully-qualified name.
    #[error("duplicate type definition '{0}'")]
    DuplicateType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("client_suffix", "must not be empty");
        let msg = error.to_string();
        assert!(msg.contains("client_suffix"));
        assert!(msg.contains("must not be empty"));
    }

    #[test]
    fn test_config_io_display() {
        let error = ConfigError::Io {
            path: Utf8PathBuf::from("/etc/tshub.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(error.to_string().contains("/etc/tshub.json"));
    }

    #[test]
    fn test_metadata_not_found_display() {
        let error = MetadataError::NotFound(Utf8PathBuf::from("bin/Server.metadata.json"));
        assert!(error.to_string().contains("bin/Server.metadata.json"));
    }

    #[test]
    fn test_duplicate_type_display() {
        let error = MetadataError::DuplicateType("Demo.Order".to_owned());
        assert_eq!(error.to_string(), "duplicate type definition 'Demo.Order'");
    }
}
