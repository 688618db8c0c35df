//! CLI-specific types.
//!
//! # Examples
//!
//! ```
//! use assetfs_core::Error;
//! use assetfs_core::cli::ExitCode;
//!
//! assert!(ExitCode::SUCCESS.is_success());
//!
//! let err = Error::Config { message: "bad regex".into() };
//! assert_eq!(ExitCode::from_error(&err), ExitCode::INVALID_INPUT);
//! ```

use crate::Error;
use std::fmt;

/// CLI exit code with semantic meaning.
///
/// Success is 0; every fatal condition maps to a non-zero code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// General error (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Invalid input or arguments (exit code 2).
    pub const INVALID_INPUT: Self = Self(2);

    /// Picks the exit code for a fatal error.
    ///
    /// Configuration problems are invalid input; scan, encode and write
    /// failures are general errors.
    #[must_use]
    pub const fn from_error(error: &Error) -> Self {
        match error {
            Error::Config { .. } | Error::InvalidPath { .. } => Self::INVALID_INPUT,
            _ => Self::ERROR,
        }
    }

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
