//! Virtual path normalization.
//!
//! A virtual path is the key every asset is addressed by: always rooted at
//! `/`, forward-slash separated, with no `.`/`..` segments and no trailing
//! slash except for the root itself.
//!
//! # Examples
//!
//! ```
//! use assetfs_core::{VirtualPath, clean};
//!
//! let path = VirtualPath::from_source("web/static/js/app.js", "web/static");
//! assert_eq!(path.as_str(), "/js/app.js");
//! assert_eq!(path.parent().unwrap().as_str(), "/js");
//!
//! assert_eq!(clean("//js/./lib/../app.js"), "/js/app.js");
//! ```

use crate::{Error, Result};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Lexically cleans a request path into rooted form.
///
/// Repeated slashes and `.` segments are dropped and `..` removes the
/// preceding segment. `..` never climbs above the root, so the result is
/// always a path inside the virtual namespace.
///
/// # Examples
///
/// ```
/// use assetfs_core::clean;
///
/// assert_eq!(clean(""), "/");
/// assert_eq!(clean("a/b/"), "/a/b");
/// assert_eq!(clean("/../../etc/passwd"), "/etc/passwd");
/// ```
#[must_use]
pub fn clean(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        let mut out = String::with_capacity(path.len() + 1);
        for segment in segments {
            out.push('/');
            out.push_str(segment);
        }
        out
    }
}

/// Converts a platform path into a forward-slash string.
///
/// On Windows the native separator is replaced; elsewhere the path is
/// taken as-is (lossily, if it is not valid UTF-8).
#[must_use]
pub fn to_slash(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if cfg!(target_os = "windows") {
        raw.replace(std::path::MAIN_SEPARATOR, "/")
    } else {
        raw.into_owned()
    }
}

/// Renders an on-disk path as a tidy forward-slash string.
///
/// `.` components and trailing separators are dropped, so `./assets/` is
/// rendered as `assets`. An empty result is rendered as `.`.
///
/// # Examples
///
/// ```
/// use assetfs_core::display_source;
/// use std::path::Path;
///
/// assert_eq!(display_source(Path::new("./web/./app.js")), "web/app.js");
/// assert_eq!(display_source(Path::new(".")), ".");
/// ```
#[must_use]
pub fn display_source(path: &Path) -> String {
    let tidy: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let slashed = to_slash(&tidy);
    if slashed.is_empty() {
        ".".to_string()
    } else {
        slashed
    }
}

/// Tidies a `--prefix` value the same way source paths are tidied.
///
/// An empty prefix, or one that names the current directory, strips
/// nothing and is returned empty.
///
/// # Examples
///
/// ```
/// use assetfs_core::source_prefix;
///
/// assert_eq!(source_prefix("./public/"), "public");
/// assert_eq!(source_prefix("./"), "");
/// ```
#[must_use]
pub fn source_prefix(prefix: &str) -> String {
    if prefix.is_empty() {
        return String::new();
    }
    match display_source(Path::new(prefix)) {
        dot if dot == "." => String::new(),
        tidy => tidy,
    }
}

/// A rooted, normalized virtual path.
///
/// Ordering is byte-wise on the underlying string, which is the order the
/// generator emits records in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualPath(String);

impl VirtualPath {
    /// The root of the virtual namespace.
    pub const ROOT: &'static str = "/";

    /// Validates an already-virtual path.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPath` if the path is not rooted or is not in
    /// cleaned form (contains `.`, `..`, repeated or trailing slashes).
    ///
    /// # Examples
    ///
    /// ```
    /// use assetfs_core::VirtualPath;
    ///
    /// assert!(VirtualPath::new("/css/site.css").is_ok());
    /// assert!(VirtualPath::new("css/site.css").is_err());
    /// assert!(VirtualPath::new("/css/../site.css").is_err());
    /// ```
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        if !path.starts_with('/') || clean(&path) != path {
            return Err(Error::InvalidPath { path });
        }
        Ok(Self(path))
    }

    /// Maps an on-disk path into the virtual namespace.
    ///
    /// Separators are converted to `/`, `prefix` is stripped when the path
    /// starts with it, and the remainder is joined onto `/`. An unmatched
    /// prefix is left in place; the result is rooted either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetfs_core::VirtualPath;
    ///
    /// assert_eq!(VirtualPath::from_source("assets/a.txt", "assets").as_str(), "/a.txt");
    /// assert_eq!(VirtualPath::from_source("assets/a.txt", "other").as_str(), "/assets/a.txt");
    /// assert_eq!(VirtualPath::from_source("assets", "assets").as_str(), "/");
    /// ```
    #[must_use]
    pub fn from_source(path: impl AsRef<Path>, prefix: &str) -> Self {
        let slashed = to_slash(path.as_ref());
        let prefix = to_slash(Path::new(prefix));
        let stripped = slashed.strip_prefix(prefix.as_str()).unwrap_or(&slashed);
        Self(clean(stripped))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    /// Returns the parent directory, or `None` for the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetfs_core::VirtualPath;
    ///
    /// let path = VirtualPath::new("/a/b.txt").unwrap();
    /// assert_eq!(path.parent().unwrap().as_str(), "/a");
    /// assert_eq!(path.parent().unwrap().parent().unwrap().as_str(), "/");
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        self.0.rfind('/').map(|pos| {
            if pos == 0 {
                Self(Self::ROOT.to_string())
            } else {
                Self(self.0[..pos].to_string())
            }
        })
    }

    /// Iterates over every ancestor directory, nearest first, excluding the
    /// root.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetfs_core::VirtualPath;
    ///
    /// let path = VirtualPath::new("/a/b/c.txt").unwrap();
    /// let ancestors: Vec<_> = path.ancestors().map(|p| p.as_str().to_string()).collect();
    /// assert_eq!(ancestors, ["/a/b", "/a"]);
    /// ```
    pub fn ancestors(&self) -> impl Iterator<Item = Self> {
        std::iter::successors(self.parent(), Self::parent).take_while(|p| !p.is_root())
    }

    /// Returns the final path segment, or `/` for the root.
    #[must_use]
    pub fn file_name(&self) -> &str {
        if self.is_root() {
            return Self::ROOT;
        }
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VirtualPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
