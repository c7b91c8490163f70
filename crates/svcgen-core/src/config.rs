//! Project configuration: what to generate.
//!
//! A [`ProjectConfig`] is built once per run (from CLI flags, a JSON file, or the
//! interactive wizard) and handed to the [`Generator`](crate::generator::Generator).
//! Every selection is a closed enum so each consumer matches exhaustively.
//!
//! ## File format
//!
//! ```json
//! {
//!   "project_name": "blog",
//!   "module_path": "github.com/acme/blog",
//!   "output_dir": "./blog",
//!   "api": { "types": ["chi"] },
//!   "database": { "type": "dynamodb" },
//!   "deployment": { "type": "fly" },
//!   "features": ["auth"],
//!   "auth": { "jwt_secret": "..." }
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, Result};

/// Host used for PostHog when none is given.
pub const DEFAULT_POSTHOG_HOST: &str = "https://app.posthog.com";

/// API framework of the generated service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    Chi,
    Grpc,
    Huma,
}

impl ApiType {
    pub const ALL: [ApiType; 3] = [ApiType::Chi, ApiType::Grpc, ApiType::Huma];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chi => "chi",
            Self::Grpc => "grpc",
            Self::Huma => "huma",
        }
    }

    /// One-line description for prompts and help output.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Chi => "Chi — lightweight HTTP router with JSON handlers",
            Self::Grpc => "gRPC — protobuf service with buf code generation",
            Self::Huma => "Huma — OpenAPI-first HTTP (no files generated yet)",
        }
    }
}

/// Database backing the generated posts repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    DynamoDb,
    Postgres,
}

impl DatabaseType {
    pub const ALL: [DatabaseType; 2] = [DatabaseType::DynamoDb, DatabaseType::Postgres];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DynamoDb => "dynamodb",
            Self::Postgres => "postgres",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::DynamoDb => "DynamoDB — AWS SDK v2 client, Terraform table definition",
            Self::Postgres => "PostgreSQL — pgx client, Atlas migrations",
        }
    }
}

/// Deployment target for the generated service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentType {
    Fly,
}

impl DeploymentType {
    pub const ALL: [DeploymentType; 1] = [DeploymentType::Fly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fly => "fly",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Fly => "Fly.io — fly.toml plus a GitHub Actions deploy workflow",
        }
    }
}

/// Optional feature toggles. Metrics and hot reload are always on and are not features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Auth,
    PostHog,
}

impl Feature {
    pub const ALL: [Feature; 2] = [Feature::Auth, Feature::PostHog];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::PostHog => "posthog",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Auth => "Auth — JWT verification middleware",
            Self::PostHog => "PostHog — product analytics event tracking",
        }
    }
}

macro_rules! impl_variant_text {
    ($ty:ident, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = GeneratorError;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim().to_ascii_lowercase();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| {
                        let supported: Vec<&str> = $ty::ALL.iter().map(|v| v.as_str()).collect();
                        GeneratorError::Validation(format!(
                            "unknown {}: {} (supported: {})",
                            $label,
                            s,
                            supported.join(", ")
                        ))
                    })
            }
        }
    };
}

impl_variant_text!(ApiType, "API type");
impl_variant_text!(DatabaseType, "database type");
impl_variant_text!(DeploymentType, "deployment type");
impl_variant_text!(Feature, "feature");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API types to generate, in selection order.
    pub types: Vec<ApiType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(rename = "type")]
    pub kind: DatabaseType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    #[serde(rename = "type")]
    pub kind: DeploymentType,
}

/// JWT settings, used when [`Feature::Auth`] is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
}

/// PostHog settings, used when [`Feature::PostHog`] is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostHogConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub host: String,
}

/// Everything the generator needs to know about the project to scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub project_name: String,
    /// Go module path, e.g. `github.com/acme/blog`.
    pub module_path: String,
    pub output_dir: PathBuf,
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub deployment: DeploymentConfig,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub posthog: PostHogConfig,
}

impl ProjectConfig {
    /// Create a config with no optional features.
    pub fn new(
        project_name: impl Into<String>,
        module_path: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        api_types: Vec<ApiType>,
        database: DatabaseType,
        deployment: DeploymentType,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            module_path: module_path.into(),
            output_dir: output_dir.into(),
            api: ApiConfig { types: api_types },
            database: DatabaseConfig { kind: database },
            deployment: DeploymentConfig { kind: deployment },
            features: Vec::new(),
            auth: AuthConfig::default(),
            posthog: PostHogConfig::default(),
        }
    }

    /// Enable the auth feature with the given JWT secret.
    pub fn with_auth(mut self, jwt_secret: impl Into<String>) -> Self {
        self.features.push(Feature::Auth);
        self.auth.jwt_secret = jwt_secret.into();
        self
    }

    /// Enable PostHog tracking with the given key and host.
    pub fn with_posthog(mut self, api_key: impl Into<String>, host: impl Into<String>) -> Self {
        self.features.push(Feature::PostHog);
        self.posthog = PostHogConfig {
            api_key: api_key.into(),
            host: host.into(),
        };
        self
    }

    /// Selected API types with repeats removed, first occurrence wins.
    pub fn api_types(&self) -> Vec<ApiType> {
        dedup_ordered(&self.api.types)
    }

    /// Selected features with repeats removed, first occurrence wins.
    pub fn enabled_features(&self) -> Vec<Feature> {
        dedup_ordered(&self.features)
    }

    pub fn has_api(&self, api: ApiType) -> bool {
        self.api.types.contains(&api)
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    /// Check the fields the engine relies on. Callers run this before
    /// handing the config to the generator.
    pub fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(GeneratorError::Validation("project name is required".into()));
        }
        if self.module_path.trim().is_empty() {
            return Err(GeneratorError::Validation("module path is required".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(GeneratorError::Validation("output directory is required".into()));
        }
        if self.api.types.is_empty() {
            return Err(GeneratorError::Validation(
                "at least one API type is required (chi, grpc, or huma)".into(),
            ));
        }

        for feature in self.enabled_features() {
            match feature {
                Feature::Auth => {
                    if self.auth.jwt_secret.is_empty() {
                        return Err(GeneratorError::Validation(
                            "a JWT secret is required when the auth feature is enabled".into(),
                        ));
                    }
                }
                Feature::PostHog => {
                    if self.posthog.api_key.is_empty() {
                        return Err(GeneratorError::Validation(
                            "a PostHog API key is required when the posthog feature is enabled"
                                .into(),
                        ));
                    }
                    if self.posthog.host.is_empty() {
                        return Err(GeneratorError::Validation(
                            "a PostHog host is required when the posthog feature is enabled".into(),
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| GeneratorError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        serde_json::from_str(&contents).map_err(|e| GeneratorError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| GeneratorError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| GeneratorError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn dedup_ordered<T: Copy + PartialEq>(items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(*item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chi_dynamo() -> ProjectConfig {
        ProjectConfig::new(
            "blog",
            "github.com/acme/blog",
            "/tmp/blog",
            vec![ApiType::Chi],
            DatabaseType::DynamoDb,
            DeploymentType::Fly,
        )
    }

    #[test]
    fn test_parse_variants_case_insensitive() {
        assert_eq!("CHI".parse::<ApiType>().unwrap(), ApiType::Chi);
        assert_eq!(" grpc ".parse::<ApiType>().unwrap(), ApiType::Grpc);
        assert_eq!("DynamoDB".parse::<DatabaseType>().unwrap(), DatabaseType::DynamoDb);
        assert_eq!("postgres".parse::<DatabaseType>().unwrap(), DatabaseType::Postgres);
        assert_eq!("PostHog".parse::<Feature>().unwrap(), Feature::PostHog);
        assert_eq!("fly".parse::<DeploymentType>().unwrap(), DeploymentType::Fly);
    }

    #[test]
    fn test_parse_unknown_lists_supported() {
        let err = "mysql".parse::<DatabaseType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid project config: unknown database type: mysql (supported: dynamodb, postgres)"
        );
    }

    #[test]
    fn test_display_matches_serde_tag() {
        for api in ApiType::ALL {
            let json = serde_json::to_string(&api).unwrap();
            assert_eq!(json, format!("\"{api}\""));
        }
        for db in DatabaseType::ALL {
            let json = serde_json::to_string(&db).unwrap();
            assert_eq!(json, format!("\"{db}\""));
        }
        for feature in Feature::ALL {
            let json = serde_json::to_string(&feature).unwrap();
            assert_eq!(json, format!("\"{feature}\""));
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(chi_dynamo().validate().is_ok());
        assert!(chi_dynamo().with_auth("s3cret").validate().is_ok());
    }

    #[test]
    fn test_validate_requires_names() {
        let mut cfg = chi_dynamo();
        cfg.project_name = "  ".into();
        assert!(matches!(cfg.validate(), Err(GeneratorError::Validation(_))));

        let mut cfg = chi_dynamo();
        cfg.module_path.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = chi_dynamo();
        cfg.output_dir = PathBuf::new();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_requires_api_type() {
        let mut cfg = chi_dynamo();
        cfg.api.types.clear();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("at least one API type"));
    }

    #[test]
    fn test_validate_feature_secrets() {
        let mut cfg = chi_dynamo();
        cfg.features.push(Feature::Auth);
        assert!(cfg.validate().unwrap_err().to_string().contains("JWT secret"));

        let cfg = chi_dynamo().with_posthog("phc_123", "");
        assert!(cfg.validate().unwrap_err().to_string().contains("PostHog host"));

        let cfg = chi_dynamo().with_posthog("", DEFAULT_POSTHOG_HOST);
        assert!(cfg.validate().unwrap_err().to_string().contains("PostHog API key"));
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut cfg = chi_dynamo();
        cfg.api.types = vec![ApiType::Grpc, ApiType::Chi, ApiType::Grpc];
        cfg.features = vec![Feature::PostHog, Feature::Auth, Feature::PostHog];
        assert_eq!(cfg.api_types(), vec![ApiType::Grpc, ApiType::Chi]);
        assert_eq!(cfg.enabled_features(), vec![Feature::PostHog, Feature::Auth]);
    }

    #[test]
    fn test_save_load_preserves_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("svcgen.json");
        let cfg = chi_dynamo()
            .with_auth("s3cret")
            .with_posthog("phc_123", DEFAULT_POSTHOG_HOST);
        cfg.save(&path).unwrap();
        assert_eq!(ProjectConfig::load(&path).unwrap(), cfg);
    }

    #[test]
    fn test_load_minimal_file_defaults_optional_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("svcgen.json");
        std::fs::write(
            &path,
            r#"{
                "project_name": "blog",
                "module_path": "github.com/acme/blog",
                "output_dir": "./blog",
                "api": { "types": ["grpc"] },
                "database": { "type": "postgres" },
                "deployment": { "type": "fly" }
            }"#,
        )
        .unwrap();

        let cfg = ProjectConfig::load(&path).unwrap();
        assert_eq!(cfg.api.types, vec![ApiType::Grpc]);
        assert_eq!(cfg.database.kind, DatabaseType::Postgres);
        assert!(cfg.features.is_empty());
        assert!(cfg.auth.jwt_secret.is_empty());
    }

    #[test]
    fn test_load_errors() {
        let missing = ProjectConfig::load(Path::new("/tmp/nonexistent_svcgen_config.json"));
        assert!(matches!(missing, Err(GeneratorError::ConfigNotFound { .. })));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "database": { "type": "mysql" } }"#).unwrap();
        assert!(matches!(
            ProjectConfig::load(&path),
            Err(GeneratorError::ConfigParse { .. })
        ));
    }
}
