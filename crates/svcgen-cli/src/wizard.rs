//! Interactive prompts for values missing from flags and the config file.

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::{Input, MultiSelect, Password, Select};

use svcgen_core::config::{ApiType, DatabaseType, DeploymentType, Feature, DEFAULT_POSTHOG_HOST};

use crate::output;
use crate::resolve::Draft;

/// Prompt for every hole in `draft`. Values already present are kept as is.
pub fn complete(mut draft: Draft) -> Result<Draft> {
    output::print_header("svcgen: new service");

    if draft.project_name.is_none() {
        let name: String = Input::new()
            .with_prompt("Project name")
            .default("my-service".into())
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("project name cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        draft.project_name = Some(name.trim().to_string());
    }
    let name = draft.project_name.clone().unwrap_or_default();

    if draft.module_path.is_none() {
        let module: String = Input::new()
            .with_prompt("Go module path")
            .default(format!("github.com/user/{name}"))
            .interact_text()?;
        draft.module_path = Some(module.trim().to_string());
    }

    if draft.output_dir.is_none() {
        let dir: String = Input::new()
            .with_prompt("Output directory")
            .default(format!("./{name}"))
            .interact_text()?;
        draft.output_dir = Some(PathBuf::from(dir));
    }

    if draft.api_types.is_empty() {
        draft.api_types = select_apis()?;
    }

    if draft.database.is_none() {
        let items: Vec<&str> = DatabaseType::ALL.iter().map(|d| d.description()).collect();
        let selection = Select::new()
            .with_prompt("Select database")
            .items(&items)
            .default(0)
            .interact()?;
        draft.database = Some(DatabaseType::ALL[selection]);
    }

    if draft.features.is_none() {
        let items: Vec<&str> = Feature::ALL.iter().map(|f| f.description()).collect();
        let chosen = MultiSelect::new()
            .with_prompt("Optional features (space to toggle, enter to confirm)")
            .items(&items)
            .interact()?;
        draft.features = Some(chosen.into_iter().map(|i| Feature::ALL[i]).collect());
    }

    if draft.has_feature(Feature::Auth) && draft.jwt_secret.is_none() {
        let secret = Password::new()
            .with_prompt("JWT secret")
            .with_confirmation("Confirm JWT secret", "secrets do not match")
            .interact()?;
        draft.jwt_secret = Some(secret);
    }

    if draft.has_feature(Feature::PostHog) {
        if draft.posthog_api_key.is_none() {
            let key: String = Input::new().with_prompt("PostHog API key").interact_text()?;
            draft.posthog_api_key = Some(key.trim().to_string());
        }
        if draft.posthog_host.is_none() {
            let host: String = Input::new()
                .with_prompt("PostHog host")
                .default(DEFAULT_POSTHOG_HOST.into())
                .interact_text()?;
            draft.posthog_host = Some(host.trim().to_string());
        }
    }

    if draft.deployment.is_none() {
        let items: Vec<&str> = DeploymentType::ALL.iter().map(|d| d.description()).collect();
        let selection = Select::new()
            .with_prompt("Select deployment target")
            .items(&items)
            .default(0)
            .interact()?;
        draft.deployment = Some(DeploymentType::ALL[selection]);
    }

    Ok(draft)
}

fn select_apis() -> Result<Vec<ApiType>> {
    let items: Vec<&str> = ApiType::ALL.iter().map(|a| a.description()).collect();
    loop {
        let chosen = MultiSelect::new()
            .with_prompt("Select API types (space to toggle, enter to confirm)")
            .items(&items)
            .defaults(&[true, false, false])
            .interact()?;
        if !chosen.is_empty() {
            return Ok(chosen.into_iter().map(|i| ApiType::ALL[i]).collect());
        }
        output::print_warning("select at least one API type");
    }
}
