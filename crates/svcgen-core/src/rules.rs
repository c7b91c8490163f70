//! Rule catalog: which templates are rendered to which output paths.
//!
//! [`build_rules`] maps a [`ProjectConfig`] to an ordered list of
//! [`GenerationRule`]s. Each rule is a named group of [`FileMapping`]s with an
//! optional [`Condition`]. Conditions are pure predicates over the config and
//! are evaluated once per run; a rule whose condition is false emits nothing,
//! but its mappings still take part in the uniqueness check.
//!
//! Always generated: base files, config, dev tooling, the `postctl` CLI, metrics
//! and the posts domain. Everything else is selected by exhaustive matches on
//! the API types, database, features and deployment target.

use std::collections::HashMap;
use std::fmt;

use crate::config::{ApiType, DatabaseType, DeploymentType, Feature, ProjectConfig};
use crate::error::{GeneratorError, Result};
use crate::layout::CLI_NAME;

/// Predicate deciding whether a rule applies to a config.
pub type Condition = fn(&ProjectConfig) -> bool;

/// One output file and the template that produces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMapping {
    /// Path relative to the project's output directory, `/`-separated.
    pub output_path: String,
    /// Handle understood by the [`TemplateLoader`](crate::templates::loader::TemplateLoader).
    pub template: &'static str,
}

impl FileMapping {
    pub fn new(output_path: impl Into<String>, template: &'static str) -> Self {
        Self {
            output_path: output_path.into(),
            template,
        }
    }
}

/// A named group of file mappings, optionally gated by a condition.
#[derive(Clone)]
pub struct GenerationRule {
    pub name: &'static str,
    pub files: Vec<FileMapping>,
    pub condition: Option<Condition>,
}

impl GenerationRule {
    pub fn new(name: &'static str, files: Vec<FileMapping>) -> Self {
        Self {
            name,
            files,
            condition: None,
        }
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Whether this rule's files are generated for `config`.
    pub fn applies(&self, config: &ProjectConfig) -> bool {
        self.condition.map_or(true, |condition| condition(config))
    }
}

impl fmt::Debug for GenerationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRule")
            .field("name", &self.name)
            .field("files", &self.files)
            .field("conditional", &self.condition.is_some())
            .finish()
    }
}

/// Build the ordered rule catalog for `config`.
pub fn build_rules(config: &ProjectConfig) -> Vec<GenerationRule> {
    let mut rules = vec![
        GenerationRule::new(
            "base",
            vec![
                FileMapping::new("go.mod", "base/go.mod.tmpl"),
                FileMapping::new("README.md", "base/README.md.tmpl"),
                FileMapping::new(".gitignore", "base/gitignore.tmpl"),
                FileMapping::new(".dockerignore", "base/dockerignore.tmpl"),
                FileMapping::new("internal/config/local.yaml", "base/local.yaml.tmpl"),
                FileMapping::new("internal/config/production.yaml", "base/production.yaml.tmpl"),
                FileMapping::new("local.yaml", "base/local.yaml.tmpl"),
                FileMapping::new("production.yaml", "base/production.yaml.tmpl"),
                FileMapping::new(".env.local.example", "base/env.local.example.tmpl"),
                FileMapping::new(".env.production.example", "base/env.production.example.tmpl"),
                FileMapping::new("Makefile", "makefile/Makefile.tmpl"),
            ],
        ),
        GenerationRule::new(
            "config",
            vec![
                FileMapping::new("internal/config/config.go", "config/config.go.tmpl"),
                FileMapping::new(".env.example", "base/env.example.tmpl"),
                FileMapping::new(".env", "base/env.tmpl"),
                FileMapping::new(".env.local", "base/env.local.example.tmpl"),
            ],
        ),
        GenerationRule::new(
            "dev-tooling",
            vec![
                FileMapping::new("wgo.yaml", "wgo/wgo.yaml.tmpl"),
                FileMapping::new("Dockerfile", "docker/Dockerfile.tmpl"),
                FileMapping::new("docker-compose.yml", "docker/docker-compose.yml.tmpl"),
            ],
        ),
        GenerationRule::new(
            "cli",
            vec![
                FileMapping::new(format!("cmd/{CLI_NAME}/main.go"), "cli/main.go.tmpl"),
                FileMapping::new("internal/cli/root.go", "cli/root.go.tmpl"),
                FileMapping::new("internal/cli/server.go", "cli/server.go.tmpl"),
                FileMapping::new("internal/cli/posts.go", "cli/posts.go.tmpl"),
                FileMapping::new("internal/cli/version.go", "cli/version.go.tmpl"),
            ],
        ),
        // Metrics are mandatory, not a feature.
        GenerationRule::new(
            "metrics",
            vec![FileMapping::new("internal/metrics/metrics.go", "metrics/metrics.go.tmpl")],
        ),
    ];

    for api in config.api_types() {
        match api {
            ApiType::Chi => {
                // With gRPC present, the gRPC server owns internal/api/server.go
                // and Chi serves HTTP alongside it.
                let server_path = if config.has_api(ApiType::Grpc) {
                    "internal/api/http_server.go"
                } else {
                    "internal/api/server.go"
                };
                rules.push(GenerationRule::new(
                    "chi",
                    vec![
                        FileMapping::new(server_path, "chi/server.go.tmpl"),
                        FileMapping::new("internal/json/json.go", "chi/json.go.tmpl"),
                        FileMapping::new("internal/posts/handlers.go", "posts/handlers.go.tmpl"),
                    ],
                ));
                // The gRPC group owns cmd/api/main.go when both are selected.
                if !config.has_api(ApiType::Grpc) {
                    rules.push(GenerationRule::new(
                        "chi-main",
                        vec![FileMapping::new("cmd/api/main.go", "base/main.go.tmpl")],
                    ));
                }
            }
            ApiType::Grpc => {
                rules.push(GenerationRule::new(
                    "grpc",
                    vec![
                        FileMapping::new("internal/api/server.go", "grpc/server.go.tmpl"),
                        FileMapping::new("internal/api/posts_handler.go", "grpc/posts_handler.go.tmpl"),
                        FileMapping::new("protos/posts/v1/posts.proto", "grpc/posts.proto.tmpl"),
                        FileMapping::new("buf.yaml", "grpc/buf.yaml.tmpl"),
                        FileMapping::new("buf.gen.yaml", "grpc/buf.gen.yaml.tmpl"),
                        FileMapping::new("cmd/api/main.go", "grpc/main.go.tmpl"),
                    ],
                ));
            }
            // No Huma templates yet.
            ApiType::Huma => {}
        }
    }

    match config.database.kind {
        DatabaseType::DynamoDb => {
            rules.push(GenerationRule::new(
                "dynamodb",
                vec![
                    FileMapping::new("internal/database/dynamodb.go", "dynamodb/dynamodb.go.tmpl"),
                    FileMapping::new("internal/posts/dynamodb_table.go", "posts/dynamodb_table.go.tmpl"),
                    FileMapping::new(
                        "internal/posts/post_table_test.go",
                        "posts/dynamodb_table_test.go.tmpl",
                    ),
                ],
            ));
            rules.push(GenerationRule::new(
                "terraform",
                vec![
                    FileMapping::new("terraform/main.tf", "terraform/main.tf.tmpl"),
                    FileMapping::new("terraform/variables.tf", "terraform/variables.tf.tmpl"),
                    FileMapping::new("terraform/.gitignore", "terraform/gitignore.tmpl"),
                    FileMapping::new("terraform/README.md", "terraform/README.md.tmpl"),
                ],
            ));
        }
        DatabaseType::Postgres => {
            rules.push(GenerationRule::new(
                "postgres",
                vec![
                    FileMapping::new("internal/database/postgres.go", "postgres/postgres.go.tmpl"),
                    FileMapping::new("internal/posts/postgres_table.go", "posts/postgres_table.go.tmpl"),
                    FileMapping::new(
                        "internal/posts/post_table_test.go",
                        "posts/postgres_table_test.go.tmpl",
                    ),
                    FileMapping::new("atlas.hcl", "atlas/atlas.hcl.tmpl"),
                    FileMapping::new(
                        "migrations/001_initial.up.sql",
                        "atlas/migrations/001_initial.up.sql.tmpl",
                    ),
                    FileMapping::new(
                        "migrations/001_initial.down.sql",
                        "atlas/migrations/001_initial.down.sql.tmpl",
                    ),
                ],
            ));
        }
    }

    rules.push(GenerationRule::new(
        "posts",
        vec![
            FileMapping::new("internal/posts/post.go", "posts/post.go.tmpl"),
            FileMapping::new("internal/posts/service.go", "posts/service.go.tmpl"),
            FileMapping::new("internal/posts/converters.go", "posts/converters.go.tmpl"),
            FileMapping::new("internal/posts/converters_test.go", "posts/converters_test.go.tmpl"),
        ],
    ));

    for feature in config.enabled_features() {
        match feature {
            Feature::Auth => rules.push(GenerationRule::new(
                "auth",
                vec![FileMapping::new("internal/auth/jwt.go", "auth/jwt.go.tmpl")],
            )),
            Feature::PostHog => rules.push(GenerationRule::new(
                "posthog",
                vec![FileMapping::new("internal/posthog/posthog.go", "posthog/posthog.go.tmpl")],
            )),
        }
    }

    match config.deployment.kind {
        DeploymentType::Fly => rules.push(GenerationRule::new(
            "fly",
            vec![
                FileMapping::new("fly.toml", "fly/fly.toml.tmpl"),
                FileMapping::new(".github/workflows/deploy.yml", "github/workflows/deploy.yml.tmpl"),
            ],
        )),
    }

    rules
}

/// Reject the catalog if two mappings share an output path.
///
/// Every rule is checked, including rules whose condition is false for the
/// current config. Runs before anything is written; the first collision found
/// is returned.
pub fn validate_unique(rules: &[GenerationRule]) -> Result<()> {
    let mut seen: HashMap<&str, &'static str> = HashMap::new();
    for rule in rules {
        for file in &rule.files {
            if let Some(first_rule) = seen.insert(file.output_path.as_str(), rule.name) {
                return Err(GeneratorError::DuplicateOutputPath {
                    path: file.output_path.clone(),
                    first_rule,
                    second_rule: rule.name,
                });
            }
        }
    }
    Ok(())
}

/// Output paths of every mapping generated for `config`, in emission order.
pub fn planned_files(config: &ProjectConfig) -> Vec<String> {
    build_rules(config)
        .iter()
        .filter(|rule| rule.applies(config))
        .flat_map(|rule| rule.files.iter().map(|file| file.output_path.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api: Vec<ApiType>, db: DatabaseType) -> ProjectConfig {
        ProjectConfig::new("t", "github.com/t/t", "/tmp/t", api, db, DeploymentType::Fly)
    }

    fn has(files: &[String], path: &str) -> bool {
        files.iter().any(|f| f == path)
    }

    #[test]
    fn test_always_present_groups_lead_the_catalog() {
        let rules = build_rules(&config(vec![ApiType::Huma], DatabaseType::DynamoDb));
        let names: Vec<&str> = rules.iter().map(|r| r.name).collect();
        assert_eq!(&names[..5], &["base", "config", "dev-tooling", "cli", "metrics"]);
    }

    #[test]
    fn test_chi_main_left_out_when_grpc_selected() {
        let cfg = config(vec![ApiType::Chi, ApiType::Grpc], DatabaseType::DynamoDb);
        let rules = build_rules(&cfg);
        assert!(!rules.iter().any(|r| r.name == "chi-main"));

        let mains: Vec<&str> = rules
            .iter()
            .filter(|r| r.files.iter().any(|f| f.output_path == "cmd/api/main.go"))
            .map(|r| r.name)
            .collect();
        assert_eq!(mains, vec!["grpc"]);

        let files = planned_files(&cfg);
        assert!(has(&files, "internal/api/http_server.go"));
        assert!(has(&files, "internal/api/server.go"));
        assert!(validate_unique(&rules).is_ok());
    }

    #[test]
    fn test_chi_only_uses_base_main() {
        let cfg = config(vec![ApiType::Chi], DatabaseType::DynamoDb);
        let rules = build_rules(&cfg);
        let main = rules
            .iter()
            .filter(|r| r.applies(&cfg))
            .flat_map(|r| r.files.iter())
            .find(|f| f.output_path == "cmd/api/main.go")
            .unwrap();
        assert_eq!(main.template, "base/main.go.tmpl");
    }

    #[test]
    fn test_huma_contributes_no_files() {
        let huma = planned_files(&config(vec![ApiType::Huma], DatabaseType::DynamoDb));
        assert!(!has(&huma, "cmd/api/main.go"));
        assert!(!huma.iter().any(|f| f.starts_with("internal/api/")));
    }

    #[test]
    fn test_repeated_selections_do_not_duplicate() {
        let mut cfg = config(vec![ApiType::Chi, ApiType::Chi], DatabaseType::Postgres);
        cfg = cfg.with_auth("s").with_auth("s");
        let rules = build_rules(&cfg);
        assert!(validate_unique(&rules).is_ok());
        assert_eq!(rules.iter().filter(|r| r.name == "auth").count(), 1);
    }

    #[test]
    fn test_validate_unique_reports_collision() {
        let cfg = config(vec![ApiType::Chi], DatabaseType::DynamoDb);
        let mut rules = build_rules(&cfg);
        rules.push(GenerationRule::new(
            "extra",
            vec![FileMapping::new("fly.toml", "fly/fly.toml.tmpl")],
        ));
        match validate_unique(&rules) {
            Err(GeneratorError::DuplicateOutputPath {
                path,
                first_rule,
                second_rule,
            }) => {
                assert_eq!(path, "fly.toml");
                assert_eq!(first_rule, "fly");
                assert_eq!(second_rule, "extra");
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn test_inapplicable_rule_still_checked_for_collisions() {
        let cfg = config(vec![ApiType::Chi], DatabaseType::DynamoDb);
        let mut rules = build_rules(&cfg);
        rules.push(
            GenerationRule::new("never", vec![FileMapping::new("go.mod", "base/go.mod.tmpl")])
                .when(|_| false),
        );
        assert!(!rules.last().unwrap().applies(&cfg));
        match validate_unique(&rules) {
            Err(GeneratorError::DuplicateOutputPath {
                path,
                first_rule,
                second_rule,
            }) => {
                assert_eq!(path, "go.mod");
                assert_eq!(first_rule, "base");
                assert_eq!(second_rule, "never");
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }
}
