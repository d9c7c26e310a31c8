//! Output formatting helpers.
//!
//! Data goes to stdout as JSON; status lines go to stderr so that listings
//! can be piped.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a dimmed status note.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a labeled status field.
pub fn status_field(label: &str, value: impl std::fmt::Display) {
    eprintln!("{}: {}", label.dimmed(), value);
}

/// Print one item as a JSON line, or as an indented block when `pretty`.
pub fn item<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
