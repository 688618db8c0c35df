//! Ignore/include filters over scanned paths.
//!
//! Patterns are matched against the forward-slash form of the on-disk
//! path. A path matching `ignore` is always rejected; when `include` is set,
//! a file must also match it. The ignore pattern is applied to directories
//! too (pruning the walk), the include pattern only to regular files.
//!
//! # Examples
//!
//! ```
//! use assetfs_codegen::FilterSpec;
//!
//! let filter = FilterSpec::new(Some(r"\.tmp$"), Some(r"\.go$")).unwrap();
//! assert!(filter.accepts("src/a.go"));
//! assert!(!filter.accepts("src/a.tmp"));
//! assert!(!filter.accepts("src/b.txt"));
//! ```

use assetfs_core::{Error, Result};
use regex::Regex;

/// Compiled ignore/include patterns.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    ignore: Option<Regex>,
    include: Option<Regex>,
}

impl FilterSpec {
    /// Compiles the given patterns. `None` and empty strings disable a
    /// pattern.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the offending flag if a pattern does
    /// not compile.
    pub fn new(ignore: Option<&str>, include: Option<&str>) -> Result<Self> {
        Ok(Self {
            ignore: compile("ignore", ignore)?,
            include: compile("include", include)?,
        })
    }

    /// Returns `true` if `path` matches the ignore pattern.
    #[must_use]
    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignore.as_ref().is_some_and(|re| re.is_match(path))
    }

    /// Returns `true` if there is no include pattern or `path` matches it.
    #[must_use]
    pub fn is_included(&self, path: &str) -> bool {
        self.include.as_ref().is_none_or(|re| re.is_match(path))
    }

    /// Returns `true` if a regular file at `path` should be embedded.
    #[must_use]
    pub fn accepts(&self, path: &str) -> bool {
        !self.is_ignored(path) && self.is_included(path)
    }
}

fn compile(flag: &str, pattern: Option<&str>) -> Result<Option<Regex>> {
    match pattern {
        None | Some("") => Ok(None),
        Some(pattern) => Regex::new(pattern).map(Some).map_err(|e| Error::Config {
            message: format!("invalid --{flag} pattern '{pattern}': {e}"),
        }),
    }
}
