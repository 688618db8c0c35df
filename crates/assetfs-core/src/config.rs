//! Configuration types for assetfs.
//!
//! [`BuildConfig`] carries everything the generator needs; it is built from
//! CLI flags, optionally layered over a TOML file. [`LocalOverride`]
//! configures the runtime's on-disk override directory.
//!
//! # Examples
//!
//! ```
//! use assetfs_core::{ArtifactFormat, BuildConfig};
//!
//! let config = BuildConfig::from_toml_str(r#"
//!     package = "assets"
//!     prefix = "web/public"
//!     ignore = '\.DS_Store$'
//!     mod_time = 1700000000
//! "#).unwrap();
//!
//! assert_eq!(config.package, "assets");
//! assert_eq!(config.mod_time, Some(1_700_000_000));
//! assert_eq!(config.format, ArtifactFormat::Rust);
//! assert!(config.validate().is_ok());
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Rust keywords that cannot name the generated module.
const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Output artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// Generated Rust source embedding the manifest
    #[default]
    Rust,
    /// Pretty-printed JSON manifest, loadable at runtime
    Json,
}

impl ArtifactFormat {
    /// Returns the string representation of the format.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetfs_core::ArtifactFormat;
    ///
    /// assert_eq!(ArtifactFormat::Rust.as_str(), "rust");
    /// assert_eq!(ArtifactFormat::Json.as_str(), "json");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rust" | "rs" => Ok(Self::Rust),
            "json" => Ok(Self::Json),
            _ => Err(Error::Config {
                message: format!("invalid artifact format: '{s}' (expected: rust or json)"),
            }),
        }
    }
}

/// Build-time configuration for the generator.
///
/// Every field has a default, so a TOML file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Output file; `None` writes to stdout.
    pub output: Option<PathBuf>,

    /// Package label; names the generated module.
    ///
    /// Default: `main`
    pub package: String,

    /// Prefix stripped from every scanned path before virtual-rooting.
    pub prefix: String,

    /// Files whose path matches this regex are skipped.
    pub ignore: Option<String>,

    /// When set, only files whose path matches this regex are embedded.
    pub include: Option<String>,

    /// Modification time (Unix seconds) stamped on every entry instead of
    /// the file's own timestamp.
    pub mod_time: Option<i64>,

    /// Emit crate-private accessors instead of public ones.
    pub private: bool,

    /// Artifact format.
    pub format: ArtifactFormat,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: None,
            package: "main".to_string(),
            prefix: String::new(),
            ignore: None,
            include: None,
            mod_time: None,
            private: false,
            format: ArtifactFormat::default(),
        }
    }
}

impl BuildConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text is not valid TOML or contains
    /// unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config {
            message: format!("invalid configuration: {e}"),
        })
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&text)
    }

    /// Validates fields that can be checked without touching the source
    /// tree.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the package label is not a usable Rust
    /// module name.
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.package) {
            return Err(Error::Config {
                message: format!("package '{}' is not a valid Rust identifier", self.package),
            });
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name != "_"
        && !RESERVED.contains(&name)
}

/// Runtime on-disk override.
///
/// When enabled, each request has `strip_prefix` trimmed from its front and
/// is joined onto `base_dir`; a file found there is served instead of the
/// embedded copy.
///
/// # Examples
///
/// ```
/// use assetfs_core::LocalOverride;
///
/// let local = LocalOverride::new("./web/public").with_strip_prefix("/static");
/// assert!(local.enabled);
/// assert!(!LocalOverride::default().enabled);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalOverride {
    /// Check the real directory before embedded data.
    pub enabled: bool,
    /// Real directory requests are resolved against.
    pub base_dir: PathBuf,
    /// Prefix trimmed from the request path before joining.
    pub strip_prefix: String,
}

impl LocalOverride {
    /// Creates an enabled override rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            enabled: true,
            base_dir: base_dir.into(),
            strip_prefix: String::new(),
        }
    }

    /// Sets the prefix trimmed from requests before joining.
    #[must_use]
    pub fn with_strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefix = prefix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();
        assert_eq!(config.package, "main");
        assert!(config.output.is_none());
        assert!(!config.private);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = BuildConfig::from_toml_str("").unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn test_toml_unknown_key_rejected() {
        let err = BuildConfig::from_toml_str("pakage = \"typo\"").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_toml_format_field() {
        let config = BuildConfig::from_toml_str("format = \"json\"\nprivate = true").unwrap();
        assert_eq!(config.format, ArtifactFormat::Json);
        assert!(config.private);
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assetfs.toml");
        std::fs::write(&path, "package = \"bundle\"\noutput = \"out/assets.rs\"").unwrap();

        let config = BuildConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.package, "bundle");
        assert_eq!(config.output, Some(PathBuf::from("out/assets.rs")));
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = BuildConfig::from_toml_file("/nonexistent/assetfs.toml").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_validate_package_names() {
        for valid in ["main", "assets", "_private", "web_v2"] {
            let config = BuildConfig {
                package: valid.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "{valid} should be valid");
        }
        for invalid in ["", "_", "2fast", "my-assets", "mod", "self", "caf\u{e9}"] {
            let config = BuildConfig {
                package: invalid.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{invalid} should be rejected");
        }
    }

    #[test]
    fn test_artifact_format_parsing() {
        assert_eq!("rust".parse::<ArtifactFormat>().unwrap(), ArtifactFormat::Rust);
        assert_eq!("JSON".parse::<ArtifactFormat>().unwrap(), ArtifactFormat::Json);
        assert!("yaml".parse::<ArtifactFormat>().is_err());
        assert_eq!(ArtifactFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_local_override_toml() {
        let local: LocalOverride =
            toml::from_str("enabled = true\nbase_dir = \"public\"\nstrip_prefix = \"/assets\"")
                .unwrap();
        assert_eq!(local, LocalOverride::new("public").with_strip_prefix("/assets"));
    }
}
