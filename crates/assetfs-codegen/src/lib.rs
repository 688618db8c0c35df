//! Build-time pipeline for assetfs.
//!
//! Scans directory trees, filters and normalizes files into the virtual
//! namespace, compresses their contents, and renders a deterministic
//! artifact that `assetfs-vfs` serves at runtime.
//!
//! # Architecture
//!
//! ```text
//! Scanner ──► ManifestBuilder ──► ArtifactWriter ──► output
//!  (filter)     (codec, dirs)      (templates)
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use assetfs_codegen::Generator;
//! use assetfs_core::BuildConfig;
//!
//! let config = BuildConfig {
//!     prefix: "web/public".to_string(),
//!     mod_time: Some(0),
//!     ..Default::default()
//! };
//!
//! let generated = Generator::new(config)?.generate(&["web/public"])?;
//! println!("{} files embedded", generated.stats.files);
//! # Ok::<(), assetfs_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod filter;
pub mod generator;
pub mod manifest;
pub mod scanner;
pub mod serializer;
pub mod template_engine;

pub use filter::FilterSpec;
pub use generator::{Generated, Generator};
pub use manifest::{BuildStats, ManifestBuilder};
pub use scanner::{ScannedFile, Scanner};
pub use serializer::{ArtifactWriter, write_output};
pub use template_engine::TemplateEngine;
