//! Template data: the rendering context derived from a [`ProjectConfig`].
//!
//! [`TemplateData::from_config`] is pure and deterministic. The data is built
//! once per run and shared by every rendered file. Field names below are the
//! keys templates reference (e.g. `{{ModulePath}}`, `{{#if HasAuth}}`):
//!
//! | key | kind |
//! |-----|------|
//! | `ProjectName`, `ModulePath`, `OutputDir`, `CliName` | string |
//! | `APITypes`, `Features` | list of strings |
//! | `Database`, `Deployment` | string |
//! | `HasChi`, `HasHuma`, `HasGRPC` | bool |
//! | `HasDynamoDB`, `HasPostgres` | bool |
//! | `HasAuth`, `HasPostHog`, `HasMetrics`, `HasHotReload` | bool |
//! | `HasFly` | bool |
//! | `JWTSecret`, `PostHogAPIKey`, `PostHogHost` | string |
//!
//! Every selected API type sets its flag, not only the first one, so the flags
//! always agree with the files the rule catalog emits.

use serde::Serialize;
use serde_json::Value;

use crate::config::{ApiType, DatabaseType, DeploymentType, Feature, ProjectConfig};
use crate::layout::CLI_NAME;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateData {
    #[serde(rename = "ProjectName")]
    pub project_name: String,
    #[serde(rename = "ModulePath")]
    pub module_path: String,
    #[serde(rename = "OutputDir")]
    pub output_dir: String,
    #[serde(rename = "CliName")]
    pub cli_name: String,

    #[serde(rename = "APITypes")]
    pub api_types: Vec<String>,
    #[serde(rename = "Database")]
    pub database: String,
    #[serde(rename = "Features")]
    pub features: Vec<String>,
    #[serde(rename = "Deployment")]
    pub deployment: String,

    #[serde(rename = "HasChi")]
    pub has_chi: bool,
    #[serde(rename = "HasHuma")]
    pub has_huma: bool,
    #[serde(rename = "HasGRPC")]
    pub has_grpc: bool,
    #[serde(rename = "HasDynamoDB")]
    pub has_dynamodb: bool,
    #[serde(rename = "HasPostgres")]
    pub has_postgres: bool,
    #[serde(rename = "HasMetrics")]
    pub has_metrics: bool,
    #[serde(rename = "HasHotReload")]
    pub has_hot_reload: bool,
    #[serde(rename = "HasAuth")]
    pub has_auth: bool,
    #[serde(rename = "HasPostHog")]
    pub has_posthog: bool,
    #[serde(rename = "HasFly")]
    pub has_fly: bool,

    #[serde(rename = "JWTSecret")]
    pub jwt_secret: String,
    #[serde(rename = "PostHogAPIKey")]
    pub posthog_api_key: String,
    #[serde(rename = "PostHogHost")]
    pub posthog_host: String,
}

impl TemplateData {
    pub fn from_config(config: &ProjectConfig) -> Self {
        let api_types = config.api_types();
        let features = config.enabled_features();

        let mut data = Self {
            project_name: config.project_name.clone(),
            module_path: config.module_path.clone(),
            output_dir: config.output_dir.display().to_string(),
            cli_name: CLI_NAME.to_string(),
            api_types: api_types.iter().map(|a| a.as_str().to_string()).collect(),
            database: config.database.kind.as_str().to_string(),
            features: features.iter().map(|f| f.as_str().to_string()).collect(),
            deployment: config.deployment.kind.as_str().to_string(),
            has_chi: false,
            has_huma: false,
            has_grpc: false,
            has_dynamodb: false,
            has_postgres: false,
            has_metrics: true,
            has_hot_reload: true,
            has_auth: false,
            has_posthog: false,
            has_fly: false,
            jwt_secret: config.auth.jwt_secret.clone(),
            posthog_api_key: config.posthog.api_key.clone(),
            posthog_host: config.posthog.host.clone(),
        };

        for api in api_types {
            match api {
                ApiType::Chi => data.has_chi = true,
                ApiType::Grpc => data.has_grpc = true,
                ApiType::Huma => data.has_huma = true,
            }
        }

        match config.database.kind {
            DatabaseType::DynamoDb => data.has_dynamodb = true,
            DatabaseType::Postgres => data.has_postgres = true,
        }

        for feature in features {
            match feature {
                Feature::Auth => data.has_auth = true,
                Feature::PostHog => data.has_posthog = true,
            }
        }

        match config.deployment.kind {
            DeploymentType::Fly => data.has_fly = true,
        }

        data
    }

    /// JSON form handed to the renderer.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
