//! Tooling the generated project expects on the developer's machine.
//!
//! Missing tools never block generation; the CLI reports them as warnings so the
//! user knows what to install before `make build`.

use crate::config::{ApiType, DatabaseType, DeploymentType, ProjectConfig};

/// Information about a missing prerequisite tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteError {
    pub tool_name: String,
    pub install_instructions: String,
}

/// Tools needed to build and run a project generated from `config`, as
/// `(binary, install instructions)` pairs.
pub fn required_tools(config: &ProjectConfig) -> Vec<(&'static str, &'static str)> {
    let mut tools = vec![
        ("go", "https://go.dev/doc/install"),
        ("make", "install via your OS package manager"),
        ("docker", "https://docs.docker.com/get-docker/"),
    ];

    for api in config.api_types() {
        match api {
            ApiType::Grpc => tools.push(("buf", "https://buf.build/docs/installation")),
            ApiType::Chi | ApiType::Huma => {}
        }
    }

    match config.database.kind {
        DatabaseType::DynamoDb => {
            tools.push(("terraform", "https://developer.hashicorp.com/terraform/install"))
        }
        DatabaseType::Postgres => tools.push(("atlas", "curl -sSf https://atlasgo.sh | sh")),
    }

    match config.deployment.kind {
        DeploymentType::Fly => tools.push(("flyctl", "https://fly.io/docs/flyctl/install/")),
    }

    tools
}

/// Check that every tool in [`required_tools`] is on `PATH`.
pub fn check(config: &ProjectConfig) -> std::result::Result<(), Vec<PrerequisiteError>> {
    let missing: Vec<PrerequisiteError> = required_tools(config)
        .into_iter()
        .filter(|(tool, _)| which::which(tool).is_err())
        .map(|(tool, install)| PrerequisiteError {
            tool_name: tool.into(),
            install_instructions: install.into(),
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}
