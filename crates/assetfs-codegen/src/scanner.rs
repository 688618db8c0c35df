//! Breadth-first source tree scanner.
//!
//! The scanner walks each root with a work queue. Ignored paths are skipped
//! before they are touched; directories enqueue their children (in name
//! order); regular files passing the include filter are read in full and
//! yielded. Directories themselves are never yielded.
//!
//! Symlinks are followed. A directory that resolves to one of the
//! directories it was reached through is a filesystem loop and fails the
//! scan. Any I/O failure is yielded as an error, after which the scanner
//! stops: a build never continues past an unreadable path.
//!
//! # Examples
//!
//! ```no_run
//! use assetfs_codegen::{FilterSpec, Scanner};
//!
//! let filter = FilterSpec::new(Some(r"\.DS_Store$"), None)?;
//! for file in Scanner::new(["public"], &filter, "public") {
//!     let file = file?;
//!     println!("{} <- {}", file.virtual_path, file.source_path);
//! }
//! # Ok::<(), assetfs_core::Error>(())
//! ```

use crate::FilterSpec;
use assetfs_core::{Error, Result, VirtualPath, display_source, source_prefix};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

/// A regular file read from the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Path the file will be served under
    pub virtual_path: VirtualPath,
    /// Forward-slash on-disk path, for diagnostics
    pub source_path: String,
    /// Full file content
    pub data: Vec<u8>,
    /// Modification time in Unix seconds
    pub mod_time: i64,
}

/// A queued path and the canonical directories it was reached through.
#[derive(Debug)]
struct Pending {
    path: PathBuf,
    ancestors: Arc<Vec<PathBuf>>,
}

/// Single-pass iterator over the files under a set of roots.
#[derive(Debug)]
pub struct Scanner<'a> {
    queue: VecDeque<Pending>,
    filter: &'a FilterSpec,
    prefix: String,
    failed: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over `roots`.
    ///
    /// `prefix` is stripped from each file's tidied source path before it
    /// is rooted into the virtual namespace.
    pub fn new<P: AsRef<Path>>(
        roots: impl IntoIterator<Item = P>,
        filter: &'a FilterSpec,
        prefix: &str,
    ) -> Self {
        let top = Arc::new(Vec::new());
        Self {
            queue: roots
                .into_iter()
                .map(|p| Pending {
                    path: p.as_ref().to_path_buf(),
                    ancestors: Arc::clone(&top),
                })
                .collect(),
            filter,
            prefix: source_prefix(prefix),
            failed: false,
        }
    }

    /// Processes one queued path.
    fn visit(&mut self, pending: Pending) -> Result<Option<ScannedFile>> {
        let path = pending.path.as_path();
        let source_path = display_source(path);
        if self.filter.is_ignored(&source_path) {
            trace!(path = %source_path, "ignored");
            return Ok(None);
        }

        let metadata = fs::metadata(path).map_err(|source| scan_error(path, source))?;

        if metadata.is_dir() {
            let canonical = fs::canonicalize(path).map_err(|source| scan_error(path, source))?;
            if pending.ancestors.contains(&canonical) {
                let message = format!(
                    "filesystem loop: {source_path} leads back to {}",
                    display_source(&canonical)
                );
                return Err(scan_error(path, io::Error::other(message)));
            }

            let mut children = fs::read_dir(path)
                .and_then(|entries| {
                    entries
                        .map(|entry| entry.map(|e| e.path()))
                        .collect::<io::Result<Vec<_>>>()
                })
                .map_err(|source| scan_error(path, source))?;
            children.sort();
            trace!(path = %source_path, children = children.len(), "directory");

            let mut chain = Vec::with_capacity(pending.ancestors.len() + 1);
            chain.extend(pending.ancestors.iter().cloned());
            chain.push(canonical);
            let chain = Arc::new(chain);
            self.queue.extend(children.into_iter().map(|child| Pending {
                path: child,
                ancestors: Arc::clone(&chain),
            }));
            return Ok(None);
        }

        if !metadata.is_file() {
            debug!(path = %source_path, "skipping special file");
            return Ok(None);
        }

        if !self.filter.is_included(&source_path) {
            trace!(path = %source_path, "not included");
            return Ok(None);
        }

        let data = fs::read(path).map_err(|source| scan_error(path, source))?;
        let mod_time = file_mod_time(path, metadata.modified())?;
        let virtual_path = VirtualPath::from_source(&source_path, &self.prefix);

        Ok(Some(ScannedFile {
            virtual_path,
            source_path,
            data,
            mod_time,
        }))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<ScannedFile>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while let Some(pending) = self.queue.pop_front() {
            match self.visit(pending) {
                Ok(Some(file)) => return Some(Ok(file)),
                Ok(None) => {}
                Err(e) => {
                    self.failed = true;
                    self.queue.clear();
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

fn scan_error(path: &Path, source: io::Error) -> Error {
    Error::ScanIo {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads a file's timestamp; a platform that cannot report one fails the
/// scan like any other unreadable attribute.
fn file_mod_time(path: &Path, modified: io::Result<SystemTime>) -> Result<i64> {
    modified
        .map(unix_seconds)
        .map_err(|source| scan_error(path, source))
}

/// Converts a timestamp to signed Unix seconds; pre-epoch times are
/// negative.
fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_secs()).map_or(i64::MIN, |s| -s),
    }
}
