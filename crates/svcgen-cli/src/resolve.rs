//! Resolve a [`ProjectConfig`] from its three sources.
//!
//! Precedence, highest first: command line flags, the `--config` JSON file,
//! interactive prompts. Prompts only fill values still missing after the first
//! two, and only when a user is attached to the terminal.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use svcgen_core::config::{ApiType, DatabaseType, DeploymentType, Feature, DEFAULT_POSTHOG_HOST};
use svcgen_core::ProjectConfig;

use crate::wizard;

/// Flags shared by `create` and `plan`.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Read the project description from a JSON file (flags override its fields)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Project name
    #[arg(long)]
    pub project_name: Option<String>,

    /// Go module path (e.g. github.com/user/project)
    #[arg(long)]
    pub module_path: Option<String>,

    /// Output directory (default: ./<project-name>)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// API types, comma separated: chi, grpc, huma
    #[arg(long, value_delimiter = ',')]
    pub api: Vec<ApiType>,

    /// Database: dynamodb or postgres
    #[arg(long)]
    pub database: Option<DatabaseType>,

    /// Features, comma separated: auth, posthog
    #[arg(long, value_delimiter = ',')]
    pub features: Vec<Feature>,

    /// JWT signing secret (required with the auth feature)
    #[arg(long, env = "SVCGEN_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// PostHog project API key (required with the posthog feature)
    #[arg(long, env = "SVCGEN_POSTHOG_API_KEY", hide_env_values = true)]
    pub posthog_api_key: Option<String>,

    /// PostHog host
    #[arg(long)]
    pub posthog_host: Option<String>,

    /// Deployment target: fly
    #[arg(long)]
    pub deployment: Option<DeploymentType>,

    /// Never prompt; fail if a required value is missing
    #[arg(long)]
    pub no_input: bool,
}

/// A project description that may still have holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub project_name: Option<String>,
    pub module_path: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub api_types: Vec<ApiType>,
    pub database: Option<DatabaseType>,
    pub deployment: Option<DeploymentType>,
    /// `None` until chosen; an empty list is a valid choice.
    pub features: Option<Vec<Feature>>,
    pub jwt_secret: Option<String>,
    pub posthog_api_key: Option<String>,
    pub posthog_host: Option<String>,
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

impl Draft {
    pub fn from_config(config: ProjectConfig) -> Self {
        let features = config.enabled_features();
        Self {
            project_name: non_empty(config.project_name),
            module_path: non_empty(config.module_path),
            output_dir: Some(config.output_dir).filter(|p| !p.as_os_str().is_empty()),
            api_types: config.api.types,
            database: Some(config.database.kind),
            deployment: Some(config.deployment.kind),
            features: Some(features),
            jwt_secret: non_empty(config.auth.jwt_secret),
            posthog_api_key: non_empty(config.posthog.api_key),
            posthog_host: non_empty(config.posthog.host),
        }
    }

    /// Overlay every flag that was given.
    pub fn apply_flags(mut self, args: &ProjectArgs) -> Self {
        fn set<T: Clone>(slot: &mut Option<T>, flag: &Option<T>) {
            if let Some(value) = flag {
                *slot = Some(value.clone());
            }
        }

        set(&mut self.project_name, &args.project_name);
        set(&mut self.module_path, &args.module_path);
        set(&mut self.output_dir, &args.output_dir);
        set(&mut self.database, &args.database);
        set(&mut self.deployment, &args.deployment);
        set(&mut self.jwt_secret, &args.jwt_secret);
        set(&mut self.posthog_api_key, &args.posthog_api_key);
        set(&mut self.posthog_host, &args.posthog_host);
        if !args.api.is_empty() {
            self.api_types = args.api.clone();
        }
        if !args.features.is_empty() {
            self.features = Some(args.features.clone());
        }
        self
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.as_ref().is_some_and(|f| f.contains(&feature))
    }

    /// Flags naming the required values that are still missing.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.project_name.is_none() {
            missing.push("--project-name");
        }
        if self.module_path.is_none() {
            missing.push("--module-path");
        }
        if self.api_types.is_empty() {
            missing.push("--api");
        }
        if self.database.is_none() {
            missing.push("--database");
        }
        if self.has_feature(Feature::Auth) && self.jwt_secret.is_none() {
            missing.push("--jwt-secret");
        }
        if self.has_feature(Feature::PostHog) && self.posthog_api_key.is_none() {
            missing.push("--posthog-api-key");
        }
        missing
    }

    /// Fill defaults and build the config.
    ///
    /// Defaults: output directory `./<project-name>`, deployment `fly`, no
    /// features, PostHog host [`DEFAULT_POSTHOG_HOST`].
    pub fn into_config(self) -> Result<ProjectConfig> {
        let missing = self.missing();
        if !missing.is_empty() {
            bail!(
                "missing required values: {} (pass them as flags, use --config, or run in a terminal to be prompted)",
                missing.join(", ")
            );
        }

        let (Some(name), Some(module_path), Some(database)) =
            (self.project_name, self.module_path, self.database)
        else {
            bail!("incomplete project description");
        };
        let output_dir = self
            .output_dir
            .unwrap_or_else(|| PathBuf::from(".").join(&name));

        let mut config = ProjectConfig::new(
            name,
            module_path,
            output_dir,
            self.api_types,
            database,
            self.deployment.unwrap_or(DeploymentType::Fly),
        );
        for feature in self.features.unwrap_or_default() {
            config = match feature {
                Feature::Auth => config.with_auth(self.jwt_secret.clone().unwrap_or_default()),
                Feature::PostHog => config.with_posthog(
                    self.posthog_api_key.clone().unwrap_or_default(),
                    self.posthog_host
                        .clone()
                        .unwrap_or_else(|| DEFAULT_POSTHOG_HOST.to_string()),
                ),
            };
        }
        Ok(config)
    }
}

/// Resolve and validate the project config for a command.
///
/// `allow_prompt` is false for commands that must never block on input.
pub fn resolve(args: &ProjectArgs, allow_prompt: bool) -> Result<ProjectConfig> {
    let mut draft = match &args.config {
        Some(path) => {
            tracing::info!("loading project config from {}", path.display());
            Draft::from_config(ProjectConfig::load(path)?)
        }
        None => Draft::default(),
    }
    .apply_flags(args);

    let needs_input = !draft.missing().is_empty() || draft.features.is_none();
    if allow_prompt && !args.no_input && needs_input && console::user_attended() {
        draft = wizard::complete(draft)?;
    }

    let config = draft.into_config()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> ProjectArgs {
        ProjectArgs {
            project_name: Some("blog".into()),
            module_path: Some("github.com/acme/blog".into()),
            api: vec![ApiType::Chi],
            database: Some(DatabaseType::DynamoDb),
            no_input: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_only_with_defaults() {
        let config = resolve(&flags(), false).unwrap();
        assert_eq!(config.project_name, "blog");
        assert_eq!(config.output_dir, PathBuf::from("./blog"));
        assert_eq!(config.deployment.kind, DeploymentType::Fly);
        assert!(config.enabled_features().is_empty());
    }

    #[test]
    fn test_missing_values_are_named() {
        let args = ProjectArgs {
            database: None,
            module_path: None,
            ..flags()
        };
        let err = resolve(&args, false).unwrap_err().to_string();
        assert!(err.contains("--module-path"), "{err}");
        assert!(err.contains("--database"), "{err}");
        assert!(!err.contains("--api"), "{err}");
    }

    #[test]
    fn test_feature_secret_required() {
        let args = ProjectArgs {
            features: vec![Feature::Auth, Feature::PostHog],
            ..flags()
        };
        let err = resolve(&args, false).unwrap_err().to_string();
        assert!(err.contains("--jwt-secret"), "{err}");
        assert!(err.contains("--posthog-api-key"), "{err}");
    }

    #[test]
    fn test_posthog_host_defaults() {
        let args = ProjectArgs {
            features: vec![Feature::PostHog],
            posthog_api_key: Some("phc_123".into()),
            ..flags()
        };
        let config = resolve(&args, false).unwrap();
        assert_eq!(config.posthog.host, DEFAULT_POSTHOG_HOST);
        assert_eq!(config.posthog.api_key, "phc_123");
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("svc.json");
        ProjectConfig::new(
            "from-file",
            "github.com/acme/from-file",
            "/srv/from-file",
            vec![ApiType::Grpc],
            DatabaseType::Postgres,
            DeploymentType::Fly,
        )
        .with_auth("file-secret")
        .save(&path)
        .unwrap();

        let args = ProjectArgs {
            config: Some(path),
            project_name: Some("from-flag".into()),
            database: Some(DatabaseType::DynamoDb),
            no_input: true,
            ..Default::default()
        };
        let config = resolve(&args, false).unwrap();

        assert_eq!(config.project_name, "from-flag");
        assert_eq!(config.module_path, "github.com/acme/from-file");
        assert_eq!(config.output_dir, PathBuf::from("/srv/from-file"));
        assert_eq!(config.api_types(), vec![ApiType::Grpc]);
        assert_eq!(config.database.kind, DatabaseType::DynamoDb);
        assert_eq!(config.auth.jwt_secret, "file-secret");
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let args = ProjectArgs {
            config: Some(PathBuf::from("/definitely/not/here.json")),
            ..flags()
        };
        let err = resolve(&args, false).unwrap_err().to_string();
        assert!(err.contains("config file not found"), "{err}");
    }

    #[test]
    fn test_draft_from_config_round_trips() {
        let config = ProjectConfig::new(
            "blog",
            "github.com/acme/blog",
            "/tmp/blog",
            vec![ApiType::Chi, ApiType::Grpc],
            DatabaseType::Postgres,
            DeploymentType::Fly,
        )
        .with_posthog("phc", "https://eu.posthog.com");

        let rebuilt = Draft::from_config(config.clone()).into_config().unwrap();
        assert_eq!(rebuilt, config);
    }
}
