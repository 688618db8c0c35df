//! Manifest assembly.
//!
//! Collects scanned files, encodes each payload, derives the directory
//! closure and produces the sorted [`Manifest`] table. Sorting is byte-wise
//! on virtual paths, which keeps artifacts reproducible for identical
//! inputs.
//!
//! # Examples
//!
//! ```
//! use assetfs_codegen::{ManifestBuilder, ScannedFile};
//! use assetfs_core::VirtualPath;
//!
//! let mut builder = ManifestBuilder::new("public", Some(0));
//! builder.add(ScannedFile {
//!     virtual_path: VirtualPath::new("/css/site.css").unwrap(),
//!     source_path: "public/css/site.css".to_string(),
//!     data: b"body{}".to_vec(),
//!     mod_time: 1_700_000_000,
//! }).unwrap();
//!
//! let (manifest, stats) = builder.build().unwrap();
//! assert_eq!(stats.files, 1);
//! assert_eq!(stats.dirs, 1);
//! assert!(manifest.get("/css").unwrap().is_dir());
//! ```

use crate::ScannedFile;
use assetfs_core::{
    DirRecord, Error, FileRecord, Manifest, ManifestEntry, Result, VirtualPath, codec,
    source_prefix,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Summary of a finished build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Number of embedded files
    pub files: usize,
    /// Number of implied directories (excluding the root)
    pub dirs: usize,
    /// Total uncompressed size in bytes
    pub raw_bytes: u64,
    /// Total encoded payload size in bytes
    pub encoded_bytes: u64,
}

impl BuildStats {
    /// Returns encoded size as a fraction of raw size, if anything was
    /// embedded.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> Option<f64> {
        (self.raw_bytes > 0).then(|| self.encoded_bytes as f64 / self.raw_bytes as f64)
    }
}

/// Accumulates scanned files into a manifest.
#[derive(Debug)]
pub struct ManifestBuilder {
    prefix: String,
    mod_time: Option<i64>,
    files: BTreeMap<VirtualPath, FileRecord>,
    stats: BuildStats,
}

impl ManifestBuilder {
    /// Creates a builder.
    ///
    /// `prefix` is tidied like the scanner's and used to map directories
    /// back to their on-disk location. `mod_time`, when set, replaces every
    /// file's own timestamp.
    #[must_use]
    pub fn new(prefix: &str, mod_time: Option<i64>) -> Self {
        Self {
            prefix: source_prefix(prefix),
            mod_time,
            files: BTreeMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Encodes and adds one file.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicatePath` if another file already claimed the
    /// same virtual path, `Error::InvalidPath` if the file would sit at the
    /// root itself, and `Error::Encode` if compression fails.
    pub fn add(&mut self, file: ScannedFile) -> Result<()> {
        if file.virtual_path.is_root() {
            return Err(Error::InvalidPath {
                path: format!("{} (from {})", file.virtual_path, file.source_path),
            });
        }
        if let Some(existing) = self.files.get(&file.virtual_path) {
            return Err(Error::DuplicatePath {
                path: file.virtual_path.to_string(),
                first: existing.local.clone(),
                second: file.source_path,
            });
        }

        let compressed = codec::encode(&file.data).map_err(|source| Error::Encode {
            path: file.virtual_path.to_string(),
            source,
        })?;

        let size = file.data.len() as u64;
        self.stats.files += 1;
        self.stats.raw_bytes += size;
        self.stats.encoded_bytes += compressed.len() as u64;
        debug!(
            path = %file.virtual_path,
            size,
            encoded = compressed.len(),
            "encoded file"
        );

        let record = FileRecord {
            path: file.virtual_path.to_string(),
            local: file.source_path,
            size,
            mod_time: self.mod_time.unwrap_or(file.mod_time),
            compressed,
        };
        self.files.insert(file.virtual_path, record);
        Ok(())
    }

    /// Finishes the table: sorted files, then the sorted directory closure.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicatePath` if a file's virtual path is also an
    /// implied directory of another file.
    pub fn build(mut self) -> Result<(Manifest, BuildStats)> {
        let mut dirs = BTreeSet::new();
        for path in self.files.keys() {
            dirs.extend(path.ancestors());
        }

        if let Some(clash) = dirs.iter().find(|d| self.files.contains_key(*d)) {
            return Err(Error::DuplicatePath {
                path: clash.to_string(),
                first: self.files[clash].local.clone(),
                second: format!("directory {}", local_dir(&self.prefix, clash.as_str())),
            });
        }

        self.stats.dirs = dirs.len();

        let mut entries = Vec::with_capacity(self.files.len() + dirs.len());
        entries.extend(self.files.into_values().map(ManifestEntry::File));
        entries.extend(dirs.into_iter().map(|dir| {
            ManifestEntry::Dir(DirRecord {
                local: local_dir(&self.prefix, dir.as_str()),
                path: dir.to_string(),
            })
        }));

        Ok((Manifest { entries }, self.stats))
    }
}

/// Joins the prefix and a virtual directory into its on-disk location.
fn local_dir(prefix: &str, dir: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        dir.to_string()
    } else {
        format!("{prefix}{dir}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanned(path: &str, source: &str, data: &[u8]) -> ScannedFile {
        ScannedFile {
            virtual_path: VirtualPath::new(path).unwrap(),
            source_path: source.to_string(),
            data: data.to_vec(),
            mod_time: 1_600_000_000,
        }
    }

    #[test]
    fn test_directory_closure() {
        let mut builder = ManifestBuilder::new("", None);
        builder.add(scanned("/a/b/c.txt", "a/b/c.txt", b"c")).unwrap();
        let (manifest, stats) = builder.build().unwrap();

        let dirs: Vec<_> = manifest.dirs().map(|d| d.path.as_str()).collect();
        assert_eq!(dirs, ["/a", "/a/b"]);
        assert!(manifest.get("/").is_none());
        assert_eq!(stats.dirs, 2);
    }

    #[test]
    fn test_entries_sorted_bytewise() {
        let mut builder = ManifestBuilder::new("", None);
        for path in ["/z.txt", "/a/b.txt", "/B.txt", "/a-b/c.txt", "/a.txt"] {
            builder.add(scanned(path, &path[1..], b"x")).unwrap();
        }
        let (manifest, _) = builder.build().unwrap();

        assert!(manifest.is_sorted());
        let files: Vec<_> = manifest.files().map(|f| f.path.as_str()).collect();
        assert_eq!(files, ["/B.txt", "/a-b/c.txt", "/a.txt", "/a/b.txt", "/z.txt"]);
        let dirs: Vec<_> = manifest.dirs().map(|d| d.path.as_str()).collect();
        assert_eq!(dirs, ["/a", "/a-b"]);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let build = |order: &[&str]| {
            let mut builder = ManifestBuilder::new("", Some(1));
            for path in order {
                builder.add(scanned(path, path, path.as_bytes())).unwrap();
            }
            builder.build().unwrap().0
        };
        assert_eq!(
            build(&["/x/1", "/y/2", "/x/3"]),
            build(&["/x/3", "/x/1", "/y/2"])
        );
    }

    #[test]
    fn test_duplicate_virtual_path_rejected() {
        let mut builder = ManifestBuilder::new("", None);
        builder.add(scanned("/app.js", "one/app.js", b"1")).unwrap();
        let err = builder.add(scanned("/app.js", "two/app.js", b"2")).unwrap_err();

        assert!(err.is_duplicate_path());
        let message = err.to_string();
        assert!(message.contains("one/app.js"));
        assert!(message.contains("two/app.js"));
    }

    #[test]
    fn test_file_directory_clash_rejected() {
        let mut builder = ManifestBuilder::new("", None);
        builder.add(scanned("/docs", "one/docs", b"file")).unwrap();
        builder.add(scanned("/docs/index.html", "two/docs/index.html", b"page")).unwrap();
        assert!(builder.build().unwrap_err().is_duplicate_path());
    }

    #[test]
    fn test_root_file_rejected() {
        let mut builder = ManifestBuilder::new("", None);
        let err = builder.add(scanned("/", "lonely.txt", b"x")).unwrap_err();
        assert!(err.to_string().contains("lonely.txt"));
    }

    #[test]
    fn test_mod_time_override() {
        let mut builder = ManifestBuilder::new("", Some(42));
        builder.add(scanned("/a.txt", "a.txt", b"a")).unwrap();
        let (manifest, _) = builder.build().unwrap();
        assert_eq!(manifest.files().next().unwrap().mod_time, 42);

        let mut builder = ManifestBuilder::new("", None);
        builder.add(scanned("/a.txt", "a.txt", b"a")).unwrap();
        let (manifest, _) = builder.build().unwrap();
        assert_eq!(manifest.files().next().unwrap().mod_time, 1_600_000_000);
    }

    #[test]
    fn test_records_carry_size_and_payload() {
        let mut builder = ManifestBuilder::new("", None);
        builder.add(scanned("/a.txt", "a.txt", b"hello world")).unwrap();
        builder.add(scanned("/empty", "empty", b"")).unwrap();
        let (manifest, stats) = builder.build().unwrap();

        let a = manifest.files().find(|f| f.path == "/a.txt").unwrap();
        assert_eq!(a.size, 11);
        assert_eq!(codec::decode(&a.compressed).unwrap(), b"hello world");

        let empty = manifest.files().find(|f| f.path == "/empty").unwrap();
        assert_eq!(empty.size, 0);
        assert!(empty.compressed.is_empty());

        assert_eq!(stats.files, 2);
        assert_eq!(stats.raw_bytes, 11);
        assert!(stats.ratio().is_some());
    }

    #[test]
    fn test_directory_local_paths() {
        let mut builder = ManifestBuilder::new("web/public/", None);
        builder.add(scanned("/css/site.css", "web/public/css/site.css", b"x")).unwrap();
        let (manifest, _) = builder.build().unwrap();
        assert_eq!(manifest.dirs().next().unwrap().local, "web/public/css");

        assert_eq!(local_dir("", "/css"), "/css");
    }

    #[test]
    fn test_directory_local_matches_file_local() {
        let mut builder = ManifestBuilder::new("./public/", None);
        builder.add(scanned("/css/site.css", "public/css/site.css", b"x")).unwrap();
        let (manifest, _) = builder.build().unwrap();

        let file = manifest.files().next().unwrap();
        let dir = manifest.dirs().next().unwrap();
        assert_eq!(dir.local, "public/css");
        assert!(file.local.starts_with(&format!("{}/", dir.local)));
    }

    #[test]
    fn test_empty_build() {
        let (manifest, stats) = ManifestBuilder::new("", None).build().unwrap();
        assert!(manifest.is_empty());
        assert_eq!(stats, BuildStats::default());
        assert!(stats.ratio().is_none());
    }
}
