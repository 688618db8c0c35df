//! Template engine for artifact generation using Handlebars.
//!
//! The Rust artifact is rendered piecewise: a preamble, one fragment per
//! manifest entry, and a closing fragment. HTML escaping is disabled since
//! every value is already a Rust literal by the time it reaches a template.
//!
//! # Examples
//!
//! ```
//! use assetfs_codegen::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let fragment = engine
//!     .render("rust/dir", &json!({"path": "\"/css\"", "local": "\"public/css\""}))
//!     .unwrap();
//! assert!(fragment.contains("ManifestEntry::Dir"));
//! ```

use assetfs_core::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Template engine for artifact generation.
///
/// Wraps Handlebars with the built-in Rust artifact templates registered.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_rust_templates(&mut handlebars)?;

        Ok(Self { handlebars })
    }

    fn register_rust_templates(handlebars: &mut Handlebars<'a>) -> Result<()> {
        let templates = [
            (
                "rust/preamble",
                include_str!("../templates/rust/preamble.rs.hbs"),
            ),
            ("rust/file", include_str!("../templates/rust/file.rs.hbs")),
            ("rust/dir", include_str!("../templates/rust/dir.rs.hbs")),
            (
                "rust/closing",
                include_str!("../templates/rust/closing.rs.hbs"),
            ),
        ];

        for (name, source) in templates {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::Serialize {
                    message: format!("Failed to register {name} template: {e}"),
                    source: None,
                })?;
        }
        Ok(())
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - A variable used by the template is missing
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::Serialize {
                message: format!("Template rendering failed: {e}"),
                source: None,
            })
    }
}
