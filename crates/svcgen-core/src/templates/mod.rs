//! Template system for project scaffolding.
//!
//! Templates are embedded into the binary at compile-time via [`include_str!`] in the
//! [`embedded`] module, looked up by handle through a [`loader::TemplateLoader`], then
//! rendered with [Handlebars](https://handlebarsjs.com/) by the [`renderer::TemplateRenderer`].
//!
//! ## Template variables
//!
//! Templates see the keys of [`TemplateData`](crate::context::TemplateData), e.g.
//! `{{ModulePath}}`, `{{ProjectName}}`, `{{#if HasGRPC}}...{{/if}}`.
//!
//! ## Adding a new template
//!
//! 1. Create the `.tmpl` file under `templates/`
//! 2. Add an entry with `include_str!` to [`embedded::TEMPLATES`]
//! 3. Reference the handle from a rule in [`rules`](crate::rules)
//!
//! **Warning**: handles in [`rules`](crate::rules) and entries in [`embedded`] must stay in
//! sync. `tests/templates.rs` renders every handle the catalog can produce.

pub mod embedded;
pub mod loader;
pub mod renderer;

use thiserror::Error;

/// Failures reported by the template collaborators.
///
/// The generator wraps these with the output path being produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template '{0}' not found")]
    NotFound(String),

    #[error("failed to parse template '{name}': {reason}")]
    Parse { name: String, reason: String },

    #[error("failed to render template '{name}': {reason}")]
    Render { name: String, reason: String },
}
