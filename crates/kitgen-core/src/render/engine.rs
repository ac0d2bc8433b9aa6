//! Handlebars-backed rendering engine handle

use anyhow::{Context, Result};
use handlebars::{handlebars_helper, Handlebars};
use heck::{ToKebabCase, ToPascalCase};
use serde_json::Value as Json;

handlebars_helper!(kebab: |s: str| s.to_kebab_case());
handlebars_helper!(pascal: |s: str| s.to_pascal_case());

/// Rendering engine shared by every action of a run
pub struct RenderEngine {
    handlebars: Handlebars<'static>,
}

impl RenderEngine {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        // Generated files are source code, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(false);
        handlebars.register_helper("kebab", Box::new(kebab));
        handlebars.register_helper("pascal", Box::new(pascal));
        Self { handlebars }
    }

    /// Render a template string against the run's data
    pub fn render_str(&self, template: &str, data: &Json) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .context("Failed to render template")
    }
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new()
    }
}
