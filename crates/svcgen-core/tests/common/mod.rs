#![allow(dead_code)]

use std::path::Path;

use svcgen_core::config::{ApiType, DatabaseType, DeploymentType, Feature};
use svcgen_core::ProjectConfig;

pub const ROOT: &str = "/work/svc";

/// Every non-empty combination of API types, in declaration order.
pub fn api_combinations() -> Vec<Vec<ApiType>> {
    (1u8..1 << ApiType::ALL.len())
        .map(|mask| {
            ApiType::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, api)| *api)
                .collect()
        })
        .collect()
}

/// Every subset of features, in declaration order.
pub fn feature_combinations() -> Vec<Vec<Feature>> {
    (0u8..1 << Feature::ALL.len())
        .map(|mask| {
            Feature::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, f)| *f)
                .collect()
        })
        .collect()
}

pub fn config(
    root: impl AsRef<Path>,
    apis: Vec<ApiType>,
    database: DatabaseType,
    features: &[Feature],
) -> ProjectConfig {
    let mut cfg = ProjectConfig::new(
        "blog-service",
        "github.com/acme/blog-service",
        root.as_ref(),
        apis,
        database,
        DeploymentType::Fly,
    );
    for feature in features {
        cfg = match feature {
            Feature::Auth => cfg.with_auth("test-secret"),
            Feature::PostHog => cfg.with_posthog("phc_test", "https://app.posthog.com"),
        };
    }
    cfg
}

/// Every valid configuration combination rooted at [`ROOT`].
pub fn all_configs() -> Vec<ProjectConfig> {
    let mut configs = Vec::new();
    for apis in api_combinations() {
        for database in DatabaseType::ALL {
            for features in feature_combinations() {
                configs.push(config(ROOT, apis.clone(), database, &features));
            }
        }
    }
    configs
}

pub fn describe(cfg: &ProjectConfig) -> String {
    format!(
        "api={:?} db={:?} features={:?}",
        cfg.api_types(),
        cfg.database.kind,
        cfg.enabled_features()
    )
}
