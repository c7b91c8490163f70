//! Compile-time embedded templates for project scaffolding.
//!
//! Each entry loads a template file from `templates/` via [`include_str!`]. The handle is
//! the path below `templates/`; the `include_str!` path is relative to this source file
//! (`crates/svcgen-core/src/templates/embedded.rs`).
//!
//! ## Warning
//!
//! Do NOT rename or move template files without updating the handle here and in
//! [`rules`](crate::rules). A wrong path fails the build; a wrong handle in a rule
//! fails at generation time with `TemplateNotFound`.

macro_rules! embed_templates {
    ($($handle:literal),* $(,)?) => {
        &[$(($handle, include_str!(concat!("../../../../templates/", $handle)))),*]
    };
}

/// Every embedded template as `(handle, source)`.
pub static TEMPLATES: &[(&str, &str)] = embed_templates![
    // -------------------------------------------------------
    // Project base
    // -------------------------------------------------------
    "base/go.mod.tmpl",
    "base/README.md.tmpl",
    "base/gitignore.tmpl",
    "base/dockerignore.tmpl",
    "base/local.yaml.tmpl",
    "base/production.yaml.tmpl",
    "base/env.tmpl",
    "base/env.example.tmpl",
    "base/env.local.example.tmpl",
    "base/env.production.example.tmpl",
    "base/main.go.tmpl",
    "makefile/Makefile.tmpl",
    "config/config.go.tmpl",
    // -------------------------------------------------------
    // Development tooling
    // -------------------------------------------------------
    "wgo/wgo.yaml.tmpl",
    "docker/Dockerfile.tmpl",
    "docker/docker-compose.yml.tmpl",
    // -------------------------------------------------------
    // postctl CLI and metrics
    // -------------------------------------------------------
    "cli/main.go.tmpl",
    "cli/root.go.tmpl",
    "cli/server.go.tmpl",
    "cli/posts.go.tmpl",
    "cli/version.go.tmpl",
    "metrics/metrics.go.tmpl",
    // -------------------------------------------------------
    // API transports
    // -------------------------------------------------------
    "chi/server.go.tmpl",
    "chi/json.go.tmpl",
    "grpc/server.go.tmpl",
    "grpc/posts_handler.go.tmpl",
    "grpc/posts.proto.tmpl",
    "grpc/buf.yaml.tmpl",
    "grpc/buf.gen.yaml.tmpl",
    "grpc/main.go.tmpl",
    // -------------------------------------------------------
    // Databases
    // -------------------------------------------------------
    "dynamodb/dynamodb.go.tmpl",
    "terraform/main.tf.tmpl",
    "terraform/variables.tf.tmpl",
    "terraform/gitignore.tmpl",
    "terraform/README.md.tmpl",
    "postgres/postgres.go.tmpl",
    "atlas/atlas.hcl.tmpl",
    "atlas/migrations/001_initial.up.sql.tmpl",
    "atlas/migrations/001_initial.down.sql.tmpl",
    // -------------------------------------------------------
    // Posts domain
    // -------------------------------------------------------
    "posts/post.go.tmpl",
    "posts/service.go.tmpl",
    "posts/converters.go.tmpl",
    "posts/converters_test.go.tmpl",
    "posts/handlers.go.tmpl",
    "posts/dynamodb_table.go.tmpl",
    "posts/dynamodb_table_test.go.tmpl",
    "posts/postgres_table.go.tmpl",
    "posts/postgres_table_test.go.tmpl",
    // -------------------------------------------------------
    // Features and deployment
    // -------------------------------------------------------
    "auth/jwt.go.tmpl",
    "posthog/posthog.go.tmpl",
    "fly/fly.toml.tmpl",
    "github/workflows/deploy.yml.tmpl",
];

/// Look up an embedded template by handle.
pub fn get(handle: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(name, _)| *name == handle)
        .map(|(_, source)| *source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        for (i, (a, _)) in TEMPLATES.iter().enumerate() {
            assert!(
                TEMPLATES[i + 1..].iter().all(|(b, _)| a != b),
                "duplicate handle {a}"
            );
        }
    }

    #[test]
    fn test_no_template_is_empty() {
        for (name, source) in TEMPLATES {
            assert!(!source.trim().is_empty(), "{name} is empty");
        }
    }
}
