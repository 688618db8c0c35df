//! Error types for assetfs.
//!
//! Every build-time failure is fatal to the whole batch, so the generator
//! surfaces exactly one of these and stops. The runtime filesystem has its
//! own error type in `assetfs-vfs`; only decoding is shared.
//!
//! # Examples
//!
//! ```
//! use assetfs_core::{Error, Result};
//!
//! fn check_package(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::Config {
//!             message: "package name cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_package("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for assetfs.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    ///
    /// Raised at startup for malformed filter patterns, invalid package
    /// labels, unreadable config files, and similar problems.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Reading the source tree failed.
    ///
    /// Covers stat, open, read and directory listing failures. The build is
    /// aborted; no partial manifest is produced.
    #[error("Failed to read {}: {source}", path.display())]
    ScanIo {
        /// On-disk path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Compressing or encoding file content failed.
    #[error("Failed to encode {path}: {source}")]
    Encode {
        /// Virtual path of the file being encoded
        path: String,
        /// Underlying compressor error
        #[source]
        source: std::io::Error,
    },

    /// Rendering or writing the output artifact failed.
    #[error("Failed to write artifact: {message}")]
    Serialize {
        /// Description of the failure
        message: String,
        /// Underlying I/O error, if any
        #[source]
        source: Option<std::io::Error>,
    },

    /// Two distinct source files normalize to the same virtual path.
    #[error("Duplicate virtual path {path}: {first} and {second}")]
    DuplicatePath {
        /// The colliding virtual path
        path: String,
        /// Source of the entry that was added first
        first: String,
        /// Source of the entry that collided with it
        second: String,
    },

    /// An encoded payload is malformed or corrupt.
    #[error("Failed to decode payload: {message}")]
    Decode {
        /// Description of the failure
        message: String,
    },

    /// A virtual path is not rooted or not in canonical form.
    #[error("Invalid virtual path: {path}")]
    InvalidPath {
        /// The offending path
        path: String,
    },
}

impl Error {
    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetfs_core::Error;
    ///
    /// let err = Error::Config {
    ///     message: "bad regex".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Returns `true` if reading the source tree failed.
    #[must_use]
    pub const fn is_scan_error(&self) -> bool {
        matches!(self, Self::ScanIo { .. })
    }

    /// Returns `true` if this is a payload decoding error.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetfs_core::Error;
    ///
    /// let err = Error::Decode {
    ///     message: "invalid base64".to_string(),
    /// };
    /// assert!(err.is_decode_error());
    /// assert!(!err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns `true` if two files collided on one virtual path.
    #[must_use]
    pub const fn is_duplicate_path(&self) -> bool {
        matches!(self, Self::DuplicatePath { .. })
    }

    /// Returns `true` if the artifact could not be rendered or written.
    #[must_use]
    pub const fn is_serialize_error(&self) -> bool {
        matches!(self, Self::Serialize { .. })
    }
}

/// Result type alias for assetfs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_detection() {
        let err = Error::Config {
            message: "invalid".to_string(),
        };
        assert!(err.is_config_error());
        assert!(!err.is_scan_error());
    }

    #[test]
    fn test_scan_error_display_names_path() {
        let err = Error::ScanIo {
            path: PathBuf::from("assets/logo.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.is_scan_error());
        let display = format!("{err}");
        assert!(display.contains("assets/logo.png"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_duplicate_path_display() {
        let err = Error::DuplicatePath {
            path: "/app.js".to_string(),
            first: "a/app.js".to_string(),
            second: "b/app.js".to_string(),
        };
        assert!(err.is_duplicate_path());
        let display = format!("{err}");
        assert!(display.contains("/app.js"));
        assert!(display.contains("a/app.js"));
        assert!(display.contains("b/app.js"));
    }

    #[test]
    fn test_serialize_error_detection() {
        let err = Error::Serialize {
            message: "disk full".to_string(),
            source: None,
        };
        assert!(err.is_serialize_error());
        assert!(!err.is_decode_error());
    }
}
