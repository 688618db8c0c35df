//! Manifest records shared by the generator and the runtime.
//!
//! A manifest is one flat table: file records sorted by virtual path,
//! followed by directory records sorted the same way. Generated Rust
//! artifacts construct these records directly; JSON artifacts deserialize
//! into them.
//!
//! # Examples
//!
//! ```
//! use assetfs_core::{DirRecord, FileRecord, Manifest, ManifestEntry};
//!
//! let manifest = Manifest {
//!     entries: vec![
//!         ManifestEntry::File(FileRecord {
//!             path: "/css/site.css".into(),
//!             local: "public/css/site.css".into(),
//!             size: 0,
//!             mod_time: 0,
//!             compressed: String::new(),
//!         }),
//!         ManifestEntry::Dir(DirRecord {
//!             path: "/css".into(),
//!             local: "public/css".into(),
//!         }),
//!     ],
//! };
//!
//! assert_eq!(manifest.files().count(), 1);
//! assert!(manifest.get("/css").unwrap().is_dir());
//! assert!(manifest.is_sorted());
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// An embedded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Virtual path the file is served under
    pub path: String,
    /// Original on-disk path, for diagnostics only
    pub local: String,
    /// Uncompressed size in bytes
    pub size: u64,
    /// Modification time in Unix seconds
    pub mod_time: i64,
    /// Encoded payload as produced by `codec::encode`
    pub compressed: String,
}

/// A directory implied by the files beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirRecord {
    /// Virtual path of the directory
    pub path: String,
    /// Mapped on-disk directory, for diagnostics only
    pub local: String,
}

/// One row of the manifest table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ManifestEntry {
    /// A file with an embedded payload
    File(FileRecord),
    /// A directory; never carries a payload
    Dir(DirRecord),
}

impl ManifestEntry {
    /// Returns the virtual path of the entry.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::File(f) => &f.path,
            Self::Dir(d) => &d.path,
        }
    }

    /// Returns `true` for directory entries.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self, Self::Dir(_))
    }
}

/// The complete table of embedded assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// File records followed by directory records
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parses a manifest from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` if the text is not a valid manifest.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Decode {
            message: format!("invalid manifest: {e}"),
        })
    }

    /// Iterates over file records in table order.
    pub fn files(&self) -> impl Iterator<Item = &FileRecord> {
        self.entries.iter().filter_map(|e| match e {
            ManifestEntry::File(f) => Some(f),
            ManifestEntry::Dir(_) => None,
        })
    }

    /// Iterates over directory records in table order.
    pub fn dirs(&self) -> impl Iterator<Item = &DirRecord> {
        self.entries.iter().filter_map(|e| match e {
            ManifestEntry::Dir(d) => Some(d),
            ManifestEntry::File(_) => None,
        })
    }

    /// Looks up an entry by virtual path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.path() == path)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the manifest has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks the canonical layout: every file record precedes every
    /// directory record, and each group is strictly increasing byte-wise.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        let split = self.entries.iter().take_while(|e| !e.is_dir()).count();
        let (files, dirs) = self.entries.split_at(split);
        let increasing = |group: &[ManifestEntry]| {
            group
                .windows(2)
                .all(|w| w[0].path().as_bytes() < w[1].path().as_bytes())
        };
        dirs.iter().all(ManifestEntry::is_dir) && increasing(files) && increasing(dirs)
    }
}
