//! Template loading capability.
//!
//! A [`TemplateLoader`] turns a template handle (e.g. `"chi/server.go.tmpl"`) into a
//! [`LoadedTemplate`] whose syntax has already been checked.

use std::collections::HashMap;

use super::embedded;
use super::TemplateError;

/// A template source that parsed successfully.
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    name: String,
    source: String,
}

impl LoadedTemplate {
    /// Check `source` for Handlebars syntax errors and wrap it.
    pub fn parse(name: &str, source: String) -> Result<Self, TemplateError> {
        handlebars::Template::compile(&source).map_err(|e| TemplateError::Parse {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            name: name.to_string(),
            source,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Source of templates for the generator.
pub trait TemplateLoader {
    fn load(&self, name: &str) -> Result<LoadedTemplate, TemplateError>;
}

/// Loads the templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateLoader;

impl EmbeddedTemplateLoader {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateLoader for EmbeddedTemplateLoader {
    fn load(&self, name: &str) -> Result<LoadedTemplate, TemplateError> {
        let source = embedded::get(name).ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        LoadedTemplate::parse(name, source.to_string())
    }
}

/// Templates held in a map, optionally falling back to the embedded set.
///
/// Useful for overriding a single template (custom template sets, tests).
#[derive(Debug, Clone, Default)]
pub struct MapTemplateLoader {
    templates: HashMap<String, String>,
    embedded_fallback: bool,
}

impl MapTemplateLoader {
    /// An empty loader: every handle not inserted is `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader that serves embedded templates unless overridden.
    pub fn over_embedded() -> Self {
        Self {
            templates: HashMap::new(),
            embedded_fallback: true,
        }
    }

    pub fn with(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(name.into(), source.into());
    }
}

impl TemplateLoader for MapTemplateLoader {
    fn load(&self, name: &str) -> Result<LoadedTemplate, TemplateError> {
        match self.templates.get(name) {
            Some(source) => LoadedTemplate::parse(name, source.clone()),
            None if self.embedded_fallback => EmbeddedTemplateLoader.load(name),
            None => Err(TemplateError::NotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_loads_known_template() {
        let tmpl = EmbeddedTemplateLoader::new().load("base/go.mod.tmpl").unwrap();
        assert_eq!(tmpl.name(), "base/go.mod.tmpl");
        assert!(tmpl.source().contains("{{ModulePath}}"));
    }

    #[test]
    fn test_embedded_unknown_is_not_found() {
        let err = EmbeddedTemplateLoader::new().load("nope.tmpl").unwrap_err();
        assert_eq!(err, TemplateError::NotFound("nope.tmpl".into()));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let loader = MapTemplateLoader::new().with("bad.tmpl", "{{#if HasAuth}}unclosed");
        assert!(matches!(
            loader.load("bad.tmpl"),
            Err(TemplateError::Parse { ref name, .. }) if name == "bad.tmpl"
        ));
    }

    #[test]
    fn test_map_overrides_embedded() {
        let loader = MapTemplateLoader::over_embedded().with("base/go.mod.tmpl", "custom");
        assert_eq!(loader.load("base/go.mod.tmpl").unwrap().source(), "custom");
        assert!(loader.load("fly/fly.toml.tmpl").is_ok());
        assert!(MapTemplateLoader::new().load("fly/fly.toml.tmpl").is_err());
    }
}
