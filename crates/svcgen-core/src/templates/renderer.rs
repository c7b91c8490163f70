//! Handlebars-based template renderer for project scaffolding.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled.
//! Strict mode ensures that any `{{variable}}` referenced in a template must be present
//! in the data context, otherwise rendering returns an error. Templates produce Go
//! source and config files; a silently missing variable would generate a project
//! that fails to build far from the actual cause.
//!
//! HTML escaping is turned off: the output is source code, and a module path or
//! a secret must come out exactly as given.

use handlebars::Handlebars;
use serde_json::Value;

use super::loader::LoadedTemplate;
use super::TemplateError;

/// Template renderer using Handlebars for generating project files.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode enabled and escaping disabled.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render a loaded template with the given data context.
    pub fn render(&self, template: &LoadedTemplate, data: &Value) -> Result<String, TemplateError> {
        self.hbs
            .render_template(template.source(), data)
            .map_err(|e| TemplateError::Render {
                name: template.name().to_string(),
                reason: e.to_string(),
            })
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
