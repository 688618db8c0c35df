//! assetfs command-line interface.
//!
//! Embeds one or more directory trees into a generated artifact. Arguments
//! are parsed into [`Cli`], merged over an optional TOML configuration file
//! into a [`BuildConfig`], and handed to the generator.
//!
//! # Examples
//!
//! ```bash
//! # Embed ./public, stripping the prefix, into src/assets.rs
//! assetfs --prefix public --modtime 0 -o src/assets.rs public
//!
//! # Only stylesheets and scripts, as a JSON manifest
//! assetfs --include '\.(css|js)$' --format json -o assets.json web/static
//! ```

use assetfs_codegen::{BuildStats, Generator};
use assetfs_core::cli::ExitCode;
use assetfs_core::{ArtifactFormat, BuildConfig, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

/// Embed static assets into a generated Rust module.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "assetfs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output file (default: standard output)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Name of the generated module [default: main]
    #[arg(long, value_name = "NAME")]
    pub pkg: Option<String>,

    /// Prefix stripped from every scanned path
    #[arg(long, value_name = "PATH")]
    pub prefix: Option<String>,

    /// Skip files whose path matches this regex
    #[arg(long, value_name = "REGEX")]
    pub ignore: Option<String>,

    /// Only embed files whose path matches this regex
    #[arg(long, value_name = "REGEX")]
    pub include: Option<String>,

    /// Unix timestamp stamped on every entry instead of its own
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub modtime: Option<i64>,

    /// Emit crate-private accessors
    #[arg(long)]
    pub private: bool,

    /// Artifact format: rust or json [default: rust]
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<ArtifactFormat>,

    /// TOML configuration file; flags override its values
    #[arg(long, value_name = "FILE", env = "ASSETFS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Files or directories to embed
    #[arg(required = true, value_name = "ROOTS")]
    pub roots: Vec<PathBuf>,
}

impl Cli {
    /// Resolves the effective build configuration.
    ///
    /// Values come from the configuration file when one is given, then
    /// any flag set on the command line replaces the corresponding value.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration file cannot be read or
    /// parsed.
    pub fn build_config(&self) -> Result<BuildConfig> {
        let mut config = match &self.config {
            Some(path) => BuildConfig::from_toml_file(path)?,
            None => BuildConfig::default(),
        };

        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if let Some(pkg) = &self.pkg {
            config.package.clone_from(pkg);
        }
        if let Some(prefix) = &self.prefix {
            config.prefix.clone_from(prefix);
        }
        if let Some(ignore) = &self.ignore {
            config.ignore = Some(ignore.clone());
        }
        if let Some(include) = &self.include {
            config.include = Some(include.clone());
        }
        if let Some(mod_time) = self.modtime {
            config.mod_time = Some(mod_time);
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        config.private |= self.private;

        Ok(config)
    }
}

/// Runs a build and maps the outcome to an exit code.
///
/// Failures are logged; nothing is written unless the whole build
/// succeeded.
#[must_use]
pub fn run(cli: &Cli) -> ExitCode {
    match build(cli) {
        Ok(stats) => {
            info!(
                files = stats.files,
                dirs = stats.dirs,
                "embedded {} files",
                stats.files
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from_error(&e)
        }
    }
}

fn build(cli: &Cli) -> Result<BuildStats> {
    let config = cli.build_config()?;
    Generator::new(config)?.run(&cli.roots)
}
