use std::path::Path;

use anyhow::{bail, Context, Result};

use svcgen_core::config::{ApiType, DatabaseType};
use svcgen_core::fs::{FileSystem, OsFileSystem};
use svcgen_core::generator::{contains_project, Generator};
use svcgen_core::prerequisites;
use svcgen_core::templates::loader::EmbeddedTemplateLoader;
use svcgen_core::ProjectConfig;

use crate::output;
use crate::resolve;
use crate::CreateArgs;

/// Generate a new service project.
///
/// Resolves the project description (prompting for anything missing when run
/// in a terminal), prepares the output directory, renders every applicable
/// template and checks for the tools the generated project needs.
pub fn run(args: &CreateArgs) -> Result<()> {
    let config = resolve::resolve(&args.project, true)?;

    output::print_header(&format!("svcgen create: {}", config.project_name));
    print_summary(&config);

    if let Some(path) = &args.save_config {
        config.save(path)?;
        output::print_success(&format!("Saved project config to {}", path.display()));
    }

    let fs = OsFileSystem;
    let output_dir = &config.output_dir;

    output::print_step(1, 3, &format!("Preparing {}", output_dir.display()));
    prepare_output_dir(&fs, output_dir, args.clean)?;

    output::print_step(2, 3, "Rendering templates");
    let generator = Generator::with_deps(config.clone(), fs, EmbeddedTemplateLoader);
    let summary = generator.generate()?;
    output::print_success(&format!(
        "Wrote {} files in {} directories",
        summary.files.len(),
        summary.directories.len()
    ));

    output::print_step(3, 3, "Checking prerequisites");
    match prerequisites::check(&config) {
        Ok(()) => output::print_success("All required tools found"),
        Err(missing) => {
            for m in &missing {
                output::print_warning(&format!(
                    "Missing: {} (install: {})",
                    m.tool_name, m.install_instructions
                ));
            }
        }
    }

    output::print_success(&format!("Project '{}' created", config.project_name));
    print_next_steps(&config);

    Ok(())
}

/// Clear or check the output directory before generation.
///
/// `--clean` only removes a directory that already holds a project (it has a
/// `go.mod`). Any other existing path is left untouched and the run fails.
fn prepare_output_dir(fs: &impl FileSystem, output_dir: &Path, clean: bool) -> Result<()> {
    let exists = fs.stat(output_dir).is_ok();
    let is_project = contains_project(fs, output_dir);

    if clean && exists {
        if !is_project {
            bail!(
                "refusing to clean {}: it does not contain a generated project (no go.mod found)",
                output_dir.display()
            );
        }
        fs.remove_all(output_dir)
            .with_context(|| format!("failed to clean {}", output_dir.display()))?;
        tracing::info!("removed {}", output_dir.display());
    } else if is_project {
        output::print_warning(&format!(
            "{} already contains a project; generated files will be overwritten (use --clean to start fresh)",
            output_dir.display()
        ));
    }
    Ok(())
}

fn print_summary(config: &ProjectConfig) {
    output::print_key_value("module", &config.module_path);
    output::print_key_value("output", &config.output_dir.display().to_string());
    output::print_key_value("api", &output::join_or_none(&config.api_types()));
    output::print_key_value("database", config.database.kind.as_str());
    output::print_key_value("features", &output::join_or_none(&config.enabled_features()));
    output::print_key_value("deployment", config.deployment.kind.as_str());
    println!();
}

fn print_next_steps(config: &ProjectConfig) {
    println!();
    println!("  Next steps:");
    println!("    cd {}", config.output_dir.display());
    println!("    make deps");
    if config.has_api(ApiType::Grpc) {
        println!("    make proto");
    }
    match config.database.kind {
        DatabaseType::DynamoDb => println!("    make docker-up"),
        DatabaseType::Postgres => {
            println!("    make docker-up");
            println!("    make migrate");
        }
    }
    println!("    make dev");
    println!();
}
