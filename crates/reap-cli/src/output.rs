//! Terminal output formatting utilities.

use colored::Colorize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message (always prints to stderr).
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print an info message.
pub fn info(msg: &str) {
    println!("{} {}", "→".blue(), msg);
}

/// Print a detail line without prefix.
///
/// Use for indented detail lines that accompany info or warn messages.
pub fn detail(msg: &str) {
    println!("{}", msg.dimmed());
}

/// Format a branch name for display.
#[must_use]
pub fn branch(name: &str) -> String {
    format!("'{}'", name.cyan())
}

/// Format a count with a noun, pluralising with a trailing `es`/`s`.
#[must_use]
pub fn count(n: usize, noun: &str) -> String {
    match (n, noun.ends_with(['s', 'h'])) {
        (1, _) => format!("{n} {noun}"),
        (_, true) => format!("{n} {noun}es"),
        (_, false) => format!("{n} {noun}s"),
    }
}
