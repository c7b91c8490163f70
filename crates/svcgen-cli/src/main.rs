//! svcgen CLI: scaffold a Go backend service from a project description.
//!
//! Three commands:
//! `create` writes the project, `plan` shows what `create` would write without
//! touching the disk, `version` prints build information.
//!
//! The project description is resolved from flags, an optional JSON file and,
//! when running in a terminal, interactive prompts (see [`resolve`]).

mod commands;
mod output;
mod resolve;
mod wizard;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::resolve::ProjectArgs;

#[derive(Parser)]
#[command(
    name = "svcgen",
    about = "Scaffold a Go backend service: Chi or gRPC, DynamoDB or Postgres, deployed to Fly",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new service project
    Create(CreateArgs),

    /// Show the directories and files `create` would write, without writing them
    Plan(PlanArgs),

    /// Print version and build information
    Version,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Write the resolved project description to this JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Remove an existing generated project (a directory with go.mod) before generating
    #[arg(long)]
    clean: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `plan --json` stays machine-readable.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Create(args) => commands::create::run(&args)?,
        Commands::Plan(args) => commands::plan::run(&args)?,
        Commands::Version => commands::version::run(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use svcgen_core::config::{ApiType, DatabaseType, Feature};

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_flags() {
        let cli = Cli::try_parse_from([
            "svcgen",
            "-vv",
            "create",
            "--project-name",
            "blog",
            "--module-path",
            "github.com/acme/blog",
            "--api",
            "chi,grpc",
            "--database",
            "postgres",
            "--features",
            "auth",
            "--jwt-secret",
            "s3cret",
            "--clean",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert!(args.clean);
        assert_eq!(args.project.api, vec![ApiType::Chi, ApiType::Grpc]);
        assert_eq!(args.project.database, Some(DatabaseType::Postgres));
        assert_eq!(args.project.features, vec![Feature::Auth]);
        assert_eq!(args.project.jwt_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_parse_rejects_unknown_database() {
        let result = Cli::try_parse_from(["svcgen", "plan", "--database", "mysql"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_plan_json() {
        let cli = Cli::try_parse_from(["svcgen", "plan", "--config", "svc.json", "--json"]).unwrap();
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        assert!(args.json);
        assert_eq!(args.project.config, Some(PathBuf::from("svc.json")));
    }
}
