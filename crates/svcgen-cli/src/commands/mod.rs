//! CLI command implementations for svcgen.
//!
//! Each module corresponds to a subcommand (`svcgen <command>`).

pub mod create;
pub mod plan;
pub mod version;
