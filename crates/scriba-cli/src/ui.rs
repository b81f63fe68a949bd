//! Console output helpers.

use console::style;

/// Print a progress/status message
pub fn status(text: &str) {
    println!("{} {}", style("→").cyan(), text);
}

/// Print a success message
pub fn success(text: &str) {
    println!("{} {}", style("✓").green().bold(), text);
}

/// Print an error message
pub fn error(text: &str) {
    eprintln!("{} {}", style("✗").red().bold(), text);
}

/// Print an info message
pub fn info(text: &str) {
    println!("{} {}", style("ℹ").blue(), text);
}
