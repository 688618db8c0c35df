//! Core types, codec, and errors for assetfs.
//!
//! This crate provides the foundational pieces shared by the build-time
//! generator (`assetfs-codegen`) and the runtime filesystem (`assetfs-vfs`).
//!
//! # Architecture
//!
//! The core consists of:
//! - Virtual path normalization (`VirtualPath`)
//! - The payload codec (gzip + base64, wrapped to 80 columns)
//! - Manifest records shared by the generator and the runtime
//! - Error hierarchy with contextual information
//! - Build and runtime configuration types
//!
//! # Examples
//!
//! ```
//! use assetfs_core::{VirtualPath, codec};
//!
//! let path = VirtualPath::from_source("public/css/site.css", "public");
//! assert_eq!(path.as_str(), "/css/site.css");
//!
//! let payload = codec::encode(b"body { margin: 0 }").unwrap();
//! assert_eq!(codec::decode(&payload).unwrap(), b"body { margin: 0 }");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cli;
pub mod codec;
mod config;
mod error;
mod manifest;
mod path;

pub use config::{ArtifactFormat, BuildConfig, LocalOverride};
pub use error::{Error, Result};
pub use manifest::{DirRecord, FileRecord, Manifest, ManifestEntry};
pub use path::{VirtualPath, clean, display_source, source_prefix, to_slash};
