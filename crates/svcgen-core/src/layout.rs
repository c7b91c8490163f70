//! Directory plan for a generated project.
//!
//! The plan is derived from the [`ProjectConfig`] alone, independently of the
//! rule catalog, and is created before any file is rendered.
//!
//! ## Directory layout
//!
//! Every project shares a common base structure:
//! ```text
//! <project>/
//! ├── cmd/api/              # service entry point
//! ├── cmd/postctl/          # generated CLI
//! └── internal/
//!     ├── config/  cli/  database/  posts/  metrics/  auth/
//! ```
//!
//! Selection-specific directories are added on top:
//! - **Chi**: `internal/api/`, `internal/json/`
//! - **gRPC**: `internal/api/`, `protos/posts/v1/`
//! - **DynamoDB**: `terraform/`
//! - **Postgres**: `migrations/`
//! - **PostHog**: `internal/posthog/`
//! - **Fly**: `.github/workflows/`

use std::path::PathBuf;

use crate::config::{ApiType, DatabaseType, DeploymentType, Feature, ProjectConfig};

/// Name of the CLI binary shipped inside every generated project.
pub const CLI_NAME: &str = "postctl";

/// Directories every project gets regardless of selections.
fn base_dirs() -> Vec<String> {
    vec![
        "cmd/api".into(),
        format!("cmd/{CLI_NAME}"),
        "internal/config".into(),
        "internal/cli".into(),
        "internal/database".into(),
        "internal/posts".into(),
        "internal/metrics".into(),
        "internal/auth".into(),
    ]
}

/// Compute the relative directories that must exist before files are written.
///
/// The result is ordered and free of duplicates.
pub fn plan_directories(config: &ProjectConfig) -> Vec<PathBuf> {
    let mut dirs = base_dirs();

    for feature in config.enabled_features() {
        match feature {
            Feature::Auth => {}
            Feature::PostHog => dirs.push("internal/posthog".into()),
        }
    }

    for api in config.api_types() {
        match api {
            ApiType::Chi => {
                dirs.push("internal/api".into());
                dirs.push("internal/json".into());
            }
            ApiType::Grpc => {
                dirs.push("internal/api".into());
                dirs.push("protos/posts/v1".into());
            }
            ApiType::Huma => {}
        }
    }

    match config.database.kind {
        DatabaseType::DynamoDb => dirs.push("terraform".into()),
        DatabaseType::Postgres => dirs.push("migrations".into()),
    }

    match config.deployment.kind {
        DeploymentType::Fly => dirs.push(".github/workflows".into()),
    }

    let mut planned: Vec<PathBuf> = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let dir = PathBuf::from(dir);
        if !planned.contains(&dir) {
            planned.push(dir);
        }
    }
    planned
}
