//! Terminal output formatting for the svcgen CLI.
//!
//! Provides consistent, colored output using the [`console`] crate.

use console::style;

/// Print a bold cyan header with an underline separator.
pub fn print_header(text: &str) {
    println!("\n{}", style(text).bold().cyan());
    println!("{}", style("=".repeat(text.len())).dim());
}

pub fn print_success(text: &str) {
    println!("{} {}", style("[OK]").green().bold(), text);
}

pub fn print_warning(text: &str) {
    println!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print a progress step indicator like `[1/3] Generating files`.
pub fn print_step(step: u32, total: u32, text: &str) {
    println!("{} {}", style(format!("[{step}/{total}]")).dim(), text);
}

pub fn print_key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Join displayable items with commas, or `none` when empty.
pub fn join_or_none<T: std::fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "none".into();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
