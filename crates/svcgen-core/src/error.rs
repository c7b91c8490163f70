//! Unified error types for the svcgen engine.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while validating a config or generating a project.
#[derive(Error, Debug)]
pub enum GeneratorError {
    // --- Configuration ---

    /// A required config field is missing or malformed. Raised by
    /// [`ProjectConfig::validate`](crate::config::ProjectConfig::validate) before the engine runs.
    #[error("invalid project config: {0}")]
    Validation(String),

    /// The project config file was not found or could not be read.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project config file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Rule catalog ---

    /// Two file mappings in the rule catalog target the same output path.
    #[error("output path {path} is declared by both '{first_rule}' and '{second_rule}'")]
    DuplicateOutputPath {
        path: String,
        first_rule: &'static str,
        second_rule: &'static str,
    },

    // --- Emission ---

    /// The template data could not be converted into a render context.
    #[error("failed to build template data")]
    TemplateData {
        #[source]
        source: serde_json::Error,
    },

    /// A directory could not be created.
    #[error("failed to create directory {path}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template loader has no template for the requested handle.
    #[error("template '{template}' not found (while generating {path})")]
    TemplateNotFound { template: String, path: String },

    /// Template parsing or rendering failed, including references to fields
    /// missing from the template data.
    #[error("failed to render template '{template}' into {path}: {reason}")]
    Render {
        template: String,
        path: String,
        reason: String,
    },

    /// A file could not be read or written.
    #[error("I/O error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Alias for `Result<T, GeneratorError>`.
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_names_template_and_path() {
        let err = GeneratorError::Render {
            template: "chi/server.go.tmpl".into(),
            path: "internal/api/server.go".into(),
            reason: "Variable \"Missing\" not found in strict mode".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("chi/server.go.tmpl"));
        assert!(msg.contains("internal/api/server.go"));
    }

    #[test]
    fn test_template_data_error_keeps_source() {
        use std::error::Error as _;

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = GeneratorError::TemplateData { source };
        assert_eq!(err.to_string(), "failed to build template data");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_duplicate_error_names_both_rules() {
        let err = GeneratorError::DuplicateOutputPath {
            path: "cmd/api/main.go".into(),
            first_rule: "chi-main",
            second_rule: "grpc",
        };
        assert_eq!(
            err.to_string(),
            "output path cmd/api/main.go is declared by both 'chi-main' and 'grpc'"
        );
    }
}
