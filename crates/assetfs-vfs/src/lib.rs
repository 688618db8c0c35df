//! Runtime virtual filesystem for assetfs.
//!
//! Serves the manifest produced by `assetfs-codegen` as a read-only
//! filesystem. Each `open` cleans the requested path, optionally prefers a
//! live copy from an on-disk override directory, and otherwise serves the
//! embedded entry, decoding it on first access.
//!
//! # Architecture
//!
//! - [`AssetTable`]: the manifest as a lookup table, one decode cell per
//!   file, shared process-wide behind an `Arc`
//! - [`StaticFs`]: the `open` policy (override, lookup, lazy decode) and
//!   its counters
//! - [`VfsFile`]: a `Read + Seek` handle over decoded bytes, an override
//!   file, or a directory listing
//!
//! # Examples
//!
//! ```
//! use assetfs_core::LocalOverride;
//! use assetfs_vfs::{AssetTable, StaticFs};
//! use std::sync::Arc;
//!
//! let json = r#"{"entries":[{"kind":"dir","path":"/img","local":"public/img"}]}"#;
//! let table = Arc::new(AssetTable::from_json(json).unwrap());
//! let fs = StaticFs::new(table, LocalOverride::default());
//!
//! assert!(fs.open("/img").unwrap().metadata().is_dir);
//! assert!(fs.open("/missing.png").unwrap_err().is_not_found());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod file;
mod table;
mod types;
mod vfs;

pub use file::VfsFile;
pub use table::AssetTable;
pub use types::{EntryState, FileInfo, Result, VfsError};
pub use vfs::{StaticFs, VfsStats};
