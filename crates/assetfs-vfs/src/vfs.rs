//! The runtime filesystem.
//!
//! # Examples
//!
//! ```
//! use assetfs_core::{FileRecord, LocalOverride, Manifest, ManifestEntry, codec};
//! use assetfs_vfs::{AssetTable, StaticFs};
//! use std::io::Read;
//! use std::sync::Arc;
//!
//! let manifest = Manifest {
//!     entries: vec![ManifestEntry::File(FileRecord {
//!         path: "/index.html".to_string(),
//!         local: "public/index.html".to_string(),
//!         size: 13,
//!         mod_time: 0,
//!         compressed: codec::encode(b"<h1>hi</h1>\r\n").unwrap(),
//!     })],
//! };
//!
//! let fs = StaticFs::new(Arc::new(AssetTable::from_manifest(manifest)), LocalOverride::default());
//! let mut file = fs.open("/./index.html").unwrap();
//! let mut body = String::new();
//! file.read_to_string(&mut body).unwrap();
//! assert_eq!(body, "<h1>hi</h1>\r\n");
//! ```

use crate::file::VfsFile;
use crate::table::{AssetTable, Node, base_name};
use crate::types::{FileInfo, Result, VfsError};
use assetfs_core::{LocalOverride, clean};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::UNIX_EPOCH;
use tracing::{debug, trace};

/// Snapshot of a filesystem's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VfsStats {
    /// Opens served from the override directory
    pub local_hits: u64,
    /// Opens served from embedded data (files and directories)
    pub embedded_opens: u64,
    /// Opens that found nothing
    pub not_found: u64,
    /// Decodes run by this filesystem
    pub decodes: u64,
    /// Decodes that failed
    pub decode_failures: u64,
}

#[derive(Debug, Default)]
struct Counters {
    local_hits: AtomicU64,
    embedded_opens: AtomicU64,
    not_found: AtomicU64,
    decodes: AtomicU64,
    decode_failures: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> VfsStats {
        VfsStats {
            local_hits: self.local_hits.load(Ordering::Relaxed),
            embedded_opens: self.embedded_opens.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            decodes: self.decodes.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
        }
    }
}

/// Read-only filesystem over an [`AssetTable`], with an optional on-disk
/// override.
///
/// `StaticFs` is `Send + Sync`; clones share the table and the counters.
#[derive(Debug, Clone)]
pub struct StaticFs {
    table: Arc<AssetTable>,
    local: LocalOverride,
    counters: Arc<Counters>,
}

impl StaticFs {
    /// Creates a filesystem over `table`.
    #[must_use]
    pub fn new(table: Arc<AssetTable>, local: LocalOverride) -> Self {
        Self {
            table,
            local,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Returns the underlying table.
    #[must_use]
    pub const fn table(&self) -> &Arc<AssetTable> {
        &self.table
    }

    /// Returns the override settings.
    #[must_use]
    pub const fn local_override(&self) -> &LocalOverride {
        &self.local
    }

    /// Returns a snapshot of the counters.
    #[must_use]
    pub fn stats(&self) -> VfsStats {
        self.counters.snapshot()
    }

    /// Opens `path`.
    ///
    /// The path is cleaned first. With the override enabled, a regular file
    /// at the mapped on-disk location is returned as is. Otherwise the
    /// embedded entry is served, decoding it on first use. The root always
    /// opens as a directory.
    ///
    /// # Errors
    ///
    /// - `VfsError::NotFound` if nothing exists at `path`
    /// - `VfsError::Decode` if the embedded payload is corrupt; the entry
    ///   stays failed for the life of the process
    pub fn open(&self, path: &str) -> Result<VfsFile> {
        let path = clean(path);

        if self.local.enabled
            && let Some(file) = self.open_local(&path)
        {
            Counters::bump(&self.counters.local_hits);
            return Ok(file);
        }

        let Some(node) = self.table.node(&path) else {
            if path == "/" {
                Counters::bump(&self.counters.embedded_opens);
                let children = self.table.list(&path);
                return Ok(VfsFile::dir(path, FileInfo::dir("/"), children));
            }
            Counters::bump(&self.counters.not_found);
            return Err(VfsError::NotFound { path });
        };

        let file = match node {
            Node::File(file) => {
                let load = file.load();
                if load.decoded_here {
                    Counters::bump(&self.counters.decodes);
                    if load.data.is_err() {
                        Counters::bump(&self.counters.decode_failures);
                    }
                }
                VfsFile::embedded(path, file.info(), load.data?)
            }
            Node::Dir(_) => {
                let children = self.table.list(&path);
                VfsFile::dir(path, node.info(), children)
            }
        };
        Counters::bump(&self.counters.embedded_opens);
        Ok(file)
    }

    /// Maps a cleaned request path onto the override directory.
    fn local_path(&self, path: &str) -> PathBuf {
        let trimmed = path.strip_prefix(self.local.strip_prefix.as_str()).unwrap_or(path);
        let relative = trimmed.trim_start_matches('/');
        self.local.base_dir.join(relative)
    }

    /// Opens the override copy of `path`, if one exists.
    ///
    /// Anything other than a readable regular file falls through to the
    /// embedded data.
    fn open_local(&self, path: &str) -> Option<VfsFile> {
        let disk_path = self.local_path(path);
        trace!(path = %disk_path.display(), "checking override directory");

        let opened = fs::metadata(&disk_path)
            .and_then(|meta| {
                if meta.is_file() {
                    fs::File::open(&disk_path).map(|file| Some((meta, file)))
                } else {
                    Ok(None)
                }
            })
            .ok()
            .flatten();

        let Some((meta, file)) = opened else {
            debug!(path = %disk_path.display(), "override file not found");
            return None;
        };

        let info = FileInfo {
            name: base_name(path).to_string(),
            size: meta.len(),
            modified: meta.modified().unwrap_or(UNIX_EPOCH),
            is_dir: false,
        };
        Some(VfsFile::local(path.to_string(), info, file))
    }
}
