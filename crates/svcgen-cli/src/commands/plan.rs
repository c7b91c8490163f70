use anyhow::Result;
use serde::Serialize;

use svcgen_core::fs::{FileSystem, MemoryFileSystem};
use svcgen_core::generator::Generator;
use svcgen_core::templates::loader::EmbeddedTemplateLoader;

use crate::output;
use crate::resolve;
use crate::PlanArgs;

#[derive(Debug, Serialize)]
struct PlanReport {
    project_name: String,
    output_dir: String,
    directories: Vec<String>,
    files: Vec<PlannedFile>,
}

#[derive(Debug, Serialize)]
struct PlannedFile {
    path: String,
    bytes: u64,
}

/// Dry run: generate into memory and report what `create` would write.
///
/// Never prompts. Because every template is actually rendered, a successful
/// plan means `create` will not hit a template error for this config.
pub fn run(args: &PlanArgs) -> Result<()> {
    let config = resolve::resolve(&args.project, false)?;
    let report = build_report(config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::print_header(&format!("svcgen plan: {}", report.project_name));
    output::print_key_value("output", &report.output_dir);
    output::print_key_value("directories", &report.directories.len().to_string());
    output::print_key_value("files", &report.files.len().to_string());
    println!();
    for file in &report.files {
        println!("  {:<48} {:>7} B", file.path, file.bytes);
    }
    println!();
    Ok(())
}

fn build_report(config: svcgen_core::ProjectConfig) -> Result<PlanReport> {
    let generator = Generator::with_deps(config, MemoryFileSystem::new(), EmbeddedTemplateLoader);
    let summary = generator.generate()?;

    let files = summary
        .files
        .iter()
        .map(|path| {
            let bytes = generator
                .filesystem()
                .stat(&summary.output_dir.join(path))
                .map(|stat| stat.len)
                .unwrap_or(0);
            PlannedFile {
                path: path.clone(),
                bytes,
            }
        })
        .collect();

    Ok(PlanReport {
        project_name: generator.config().project_name.clone(),
        output_dir: summary.output_dir.display().to_string(),
        directories: summary
            .directories
            .iter()
            .map(|d| d.display().to_string())
            .collect(),
        files,
    })
}
