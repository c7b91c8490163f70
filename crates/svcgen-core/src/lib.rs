//! Core library for the svcgen scaffolder.
//!
//! Turns a [`config::ProjectConfig`] (API transport, database, features, deployment
//! target) into a Go service source tree. The pieces, leaves first:
//!
//! - [`config`]: the immutable project description and its closed variants
//! - [`context`]: the template data derived from a config
//! - [`rules`]: the rule catalog mapping output paths to templates
//! - [`layout`]: the directory plan created before any file is written
//! - [`generator`]: the orchestrator tying it together
//!
//! The generator talks to the outside world only through [`fs::FileSystem`] and
//! [`templates::loader::TemplateLoader`], so both can be swapped in tests or for a
//! dry run.

pub mod config;
pub mod context;
pub mod error;
pub mod fs;
pub mod generator;
pub mod layout;
pub mod prerequisites;
pub mod rules;
pub mod templates;

pub use config::ProjectConfig;
pub use error::{GeneratorError, Result};
pub use generator::{GenerationSummary, Generator};
