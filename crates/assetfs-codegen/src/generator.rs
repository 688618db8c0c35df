//! End-to-end build driver.
//!
//! [`Generator`] ties the pipeline together: scan the roots, build the
//! manifest, render the artifact and optionally write it out. Any failure
//! aborts the whole build; nothing is written unless every step succeeded.

use crate::{ArtifactWriter, BuildStats, FilterSpec, ManifestBuilder, Scanner, write_output};
use assetfs_core::{BuildConfig, Error, Manifest, Result};
use std::path::Path;
use tracing::info;

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The sorted manifest table
    pub manifest: Manifest,
    /// Rendered artifact bytes
    pub artifact: Vec<u8>,
    /// Build summary
    pub stats: BuildStats,
}

/// Builds artifacts from a validated configuration.
#[derive(Debug)]
pub struct Generator {
    config: BuildConfig,
    filter: FilterSpec,
    writer: ArtifactWriter,
}

impl Generator {
    /// Validates `config` and compiles its filters.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an invalid package label or a filter
    /// pattern that does not compile.
    pub fn new(config: BuildConfig) -> Result<Self> {
        config.validate()?;
        let filter = FilterSpec::new(config.ignore.as_deref(), config.include.as_deref())?;
        let writer = ArtifactWriter::new(&config)?;
        Ok(Self {
            config,
            filter,
            writer,
        })
    }

    /// Scans `roots` and renders the artifact in memory.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `roots` is empty, otherwise the first
    /// scan, encode, duplicate-path or rendering error encountered.
    pub fn generate<P: AsRef<Path>>(&self, roots: &[P]) -> Result<Generated> {
        if roots.is_empty() {
            return Err(Error::Config {
                message: "no input paths given".to_string(),
            });
        }

        let mut builder = ManifestBuilder::new(&self.config.prefix, self.config.mod_time);
        for file in Scanner::new(roots, &self.filter, &self.config.prefix) {
            builder.add(file?)?;
        }
        let (manifest, stats) = builder.build()?;
        let artifact = self.writer.render(&manifest)?;

        info!(
            files = stats.files,
            dirs = stats.dirs,
            raw_bytes = stats.raw_bytes,
            encoded_bytes = stats.encoded_bytes,
            format = %self.config.format,
            "generated artifact"
        );

        Ok(Generated {
            manifest,
            artifact,
            stats,
        })
    }

    /// Generates the artifact and writes it to the configured output.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Generator::generate`] or from writing the
    /// output.
    pub fn run<P: AsRef<Path>>(&self, roots: &[P]) -> Result<BuildStats> {
        let generated = self.generate(roots)?;
        write_output(&generated.artifact, self.config.output.as_deref())?;
        Ok(generated.stats)
    }
}
