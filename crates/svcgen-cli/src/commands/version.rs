use crate::output;

/// Print version and build information.
///
/// Commit and build time are baked in at compile time from `SVCGEN_GIT_COMMIT`
/// and `SVCGEN_BUILD_TIME` when the release build sets them.
pub fn run() {
    println!("svcgen {}", env!("CARGO_PKG_VERSION"));
    output::print_key_value("commit", option_env!("SVCGEN_GIT_COMMIT").unwrap_or("unknown"));
    output::print_key_value("build time", option_env!("SVCGEN_BUILD_TIME").unwrap_or("unknown"));
}
