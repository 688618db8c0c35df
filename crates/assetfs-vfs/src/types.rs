//! Core types for the runtime filesystem.
//!
//! # Examples
//!
//! ```
//! use assetfs_vfs::VfsError;
//!
//! let error = VfsError::NotFound {
//!     path: "/missing.txt".to_string(),
//! };
//! assert!(error.is_not_found());
//!
//! let io: std::io::Error = error.into();
//! assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
//! ```

use std::io;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors returned by [`StaticFs::open`](crate::StaticFs::open) and file
/// handles.
///
/// Errors are scoped to the requested path. They are `Clone` so that a
/// failed decode can be recorded once and handed to every later caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VfsError {
    /// Path is neither in the override directory nor in the manifest
    #[error("File not found: {path}")]
    NotFound {
        /// The cleaned path that was requested
        path: String,
    },

    /// Embedded payload could not be decoded
    #[error("Failed to decode {path}: {message}")]
    Decode {
        /// The entry whose payload is corrupt
        path: String,
        /// Description of the failure
        message: String,
    },

    /// Directory operation on something that is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory
        path: String,
    },
}

impl VfsError {
    /// Returns `true` if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a decode failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetfs_vfs::VfsError;
    ///
    /// let error = VfsError::Decode {
    ///     path: "/app.js".to_string(),
    ///     message: "invalid gzip stream".to_string(),
    /// };
    /// assert!(error.is_decode_error());
    /// assert!(!error.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns `true` if this is a not-a-directory error.
    #[must_use]
    pub const fn is_not_directory(&self) -> bool {
        matches!(self, Self::NotADirectory { .. })
    }
}

impl From<VfsError> for io::Error {
    fn from(error: VfsError) -> Self {
        let kind = match &error {
            VfsError::NotFound { .. } => io::ErrorKind::NotFound,
            VfsError::Decode { .. } => io::ErrorKind::InvalidData,
            VfsError::NotADirectory { .. } => io::ErrorKind::NotADirectory,
        };
        Self::new(kind, error)
    }
}

/// Type alias for Result with `VfsError`.
pub type Result<T> = std::result::Result<T, VfsError>;

/// Lazy-decode state of one embedded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryState {
    /// Never opened
    Unloaded,
    /// A decode is in flight on some thread
    Loading,
    /// Decoded and cached for the life of the process
    Loaded,
    /// Decode failed; every later open fails the same way
    Failed,
}

/// Stat information for an open handle or a directory child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Final path segment (`/` for the root)
    pub name: String,
    /// Uncompressed size in bytes; zero for directories
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
    /// Whether this is a directory
    pub is_dir: bool,
}

impl FileInfo {
    pub(crate) fn file(name: impl Into<String>, size: u64, mod_time: i64) -> Self {
        Self {
            name: name.into(),
            size,
            modified: from_unix_seconds(mod_time),
            is_dir: false,
        }
    }

    pub(crate) fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            modified: UNIX_EPOCH,
            is_dir: true,
        }
    }
}

/// Converts signed Unix seconds into a `SystemTime`.
pub(crate) fn from_unix_seconds(secs: i64) -> SystemTime {
    let offset = Duration::from_secs(secs.unsigned_abs());
    if secs >= 0 {
        UNIX_EPOCH + offset
    } else {
        UNIX_EPOCH - offset
    }
}
