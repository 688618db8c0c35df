//! Artifact rendering and output.
//!
//! Two artifact formats are supported:
//!
//! - `rust`: a module source file with the manifest as literals, rendered
//!   through [`TemplateEngine`]. Payloads are emitted as raw string
//!   literals, one 80-column line per source line.
//! - `json`: the manifest serialized as pretty-printed JSON, loadable at
//!   runtime with `AssetTable::from_json`.
//!
//! Both formats are byte-for-byte deterministic for a given manifest.

use crate::TemplateEngine;
use assetfs_core::{ArtifactFormat, BuildConfig, Error, Manifest, ManifestEntry, Result};
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Renders manifests into the configured artifact format.
#[derive(Debug)]
pub struct ArtifactWriter {
    engine: TemplateEngine<'static>,
    module: String,
    private: bool,
    format: ArtifactFormat,
}

impl ArtifactWriter {
    /// Creates a writer for the format, module name and visibility in
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the built-in templates fail to register.
    pub fn new(config: &BuildConfig) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            module: config.package.clone(),
            private: config.private,
            format: config.format,
        })
    }

    /// Renders `manifest` into artifact bytes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialize` if rendering fails.
    pub fn render(&self, manifest: &Manifest) -> Result<Vec<u8>> {
        match self.format {
            ArtifactFormat::Rust => self.render_rust(manifest).map(String::into_bytes),
            ArtifactFormat::Json => render_json(manifest),
        }
    }

    fn render_rust(&self, manifest: &Manifest) -> Result<String> {
        let visibility = if self.private { "pub(crate)" } else { "pub" };
        let mut out = self.engine.render(
            "rust/preamble",
            &json!({
                "version": env!("CARGO_PKG_VERSION"),
                "file_count": manifest.files().count(),
                "dir_count": manifest.dirs().count(),
                "visibility": visibility,
                "module": self.module,
            }),
        )?;

        for entry in &manifest.entries {
            let fragment = match entry {
                ManifestEntry::File(file) => self.engine.render(
                    "rust/file",
                    &json!({
                        "path": literal(&file.path),
                        "local": literal(&file.local),
                        "size": file.size,
                        "mod_time": file.mod_time,
                        "compressed": payload_literal(&file.compressed),
                    }),
                )?,
                ManifestEntry::Dir(dir) => self.engine.render(
                    "rust/dir",
                    &json!({
                        "path": literal(&dir.path),
                        "local": literal(&dir.local),
                    }),
                )?,
            };
            out.push_str(&fragment);
        }

        out.push_str(&self.engine.render("rust/closing", &json!({}))?);
        Ok(out)
    }
}

fn render_json(manifest: &Manifest) -> Result<Vec<u8>> {
    let mut out = serde_json::to_vec_pretty(manifest).map_err(|e| Error::Serialize {
        message: format!("JSON encoding failed: {e}"),
        source: None,
    })?;
    out.push(b'\n');
    Ok(out)
}

/// Quotes a string as a Rust literal.
fn literal(value: &str) -> String {
    format!("{value:?}")
}

/// Renders an encoded payload as an expression of type `String`.
///
/// Payload text is base64 plus newlines, so a raw string never needs a
/// `#` delimiter.
fn payload_literal(payload: &str) -> String {
    if payload.is_empty() {
        "String::new()".to_string()
    } else {
        format!("r\"\n{payload}\".into()")
    }
}

/// Writes artifact bytes to `output`, or to stdout when `None`.
///
/// File output is written to a sibling temporary file which is then renamed
/// into place, so readers never observe a partial artifact.
///
/// # Errors
///
/// Returns `Error::Serialize` carrying the underlying I/O error.
pub fn write_output(artifact: &[u8], output: Option<&Path>) -> Result<()> {
    match output {
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(artifact)
                .and_then(|()| stdout.flush())
                .map_err(|e| io_error("failed to write to stdout", e))
        }
        Some(path) => write_atomic(path, artifact),
    }
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    let written = fs::File::create(&temp_path).and_then(|mut file| {
        file.write_all(content)?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error(
            &format!("failed to write {}", temp_path.display()),
            e,
        ));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        io_error(
            &format!(
                "failed to rename {} to {}",
                temp_path.display(),
                path.display()
            ),
            e,
        )
    })?;

    debug!(path = %path.display(), bytes = content.len(), "wrote artifact");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(message: &str, source: std::io::Error) -> Error {
    Error::Serialize {
        message: format!("{message}: {source}"),
        source: Some(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetfs_core::{DirRecord, FileRecord, codec};
    use tempfile::TempDir;

    fn manifest() -> Manifest {
        Manifest {
            entries: vec![
                ManifestEntry::File(FileRecord {
                    path: "/css/site.css".to_string(),
                    local: "public/css/site.css".to_string(),
                    size: 6,
                    mod_time: 1_700_000_000,
                    compressed: codec::encode(b"body{}").unwrap(),
                }),
                ManifestEntry::File(FileRecord {
                    path: "/empty.txt".to_string(),
                    local: "public/empty.txt".to_string(),
                    size: 0,
                    mod_time: 0,
                    compressed: String::new(),
                }),
                ManifestEntry::Dir(DirRecord {
                    path: "/css".to_string(),
                    local: "public/css".to_string(),
                }),
            ],
        }
    }

    fn writer(format: ArtifactFormat, private: bool) -> ArtifactWriter {
        ArtifactWriter::new(&BuildConfig {
            package: "assets".to_string(),
            private,
            format,
            ..Default::default()
        })
        .unwrap()
    }

    // ========================================================================
    // Rust Artifact Tests
    // ========================================================================

    #[test]
    fn test_rust_artifact_layout() {
        let out = writer(ArtifactFormat::Rust, false).render(&manifest()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("DO NOT EDIT"));
        assert!(text.contains("// 2 files in 1 directories."));
        assert!(text.contains("pub mod assets {"));
        assert!(text.contains("path: \"/css/site.css\".into(),"));
        assert!(text.contains("local: \"public/css\".into(),"));
        assert!(text.contains("mod_time: 1700000000,"));
        assert!(text.contains("compressed: r\"\n"));
        assert!(text.contains("compressed: String::new(),"));

        let css = text.find("\"/css/site.css\"").unwrap();
        let empty = text.find("\"/empty.txt\"").unwrap();
        let dir = text.find("ManifestEntry::Dir").unwrap();
        assert!(css < empty && empty < dir);
    }

    #[test]
    fn test_private_visibility() {
        let out = writer(ArtifactFormat::Rust, true).render(&manifest()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("pub(crate) mod assets {"));
        assert!(text.contains("pub(crate) fn static_fs("));
        assert!(!text.contains("pub mod"));
    }

    #[test]
    fn test_literals_are_escaped() {
        assert_eq!(literal("/say \"hi\".txt"), r#""/say \"hi\".txt""#);
        assert_eq!(literal("C:\\web"), r#""C:\\web""#);
    }

    #[test]
    fn test_payload_embedded_verbatim() {
        let payload = codec::encode(&[7u8; 4096]).unwrap();
        let rendered = payload_literal(&payload);
        assert!(rendered.starts_with("r\"\n"));
        assert!(rendered.ends_with("\".into()"));
        assert!(rendered.contains(&payload));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let writer = writer(ArtifactFormat::Rust, false);
        assert_eq!(
            writer.render(&manifest()).unwrap(),
            writer.render(&manifest()).unwrap()
        );
    }

    // ========================================================================
    // JSON Artifact Tests
    // ========================================================================

    #[test]
    fn test_json_artifact_round_trips() {
        let out = writer(ArtifactFormat::Json, false).render(&manifest()).unwrap();
        assert_eq!(out.last(), Some(&b'\n'));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(Manifest::from_json(&text).unwrap(), manifest());
    }

    // ========================================================================
    // Output Tests
    // ========================================================================

    #[test]
    fn test_write_output_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assets.rs");

        write_output(b"first", Some(&path)).unwrap();
        write_output(b"second", Some(&path)).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_write_output_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing/assets.rs");

        let err = write_output(b"x", Some(&path)).unwrap_err();
        assert!(err.is_serialize_error());
        assert!(!path.exists());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = Path::new("out/assets.rs");
        assert_eq!(temp_path_for(path), Path::new("out/assets.rs.tmp"));
    }
}
