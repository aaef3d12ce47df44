//! Shared CLI output helpers for consistent operator-facing text.
//!
//! Colour is applied only when the target stream supports it, so piped
//! output stays plain.

use std::fmt::Display;

use owo_colors::{OwoColorize, Stream};

/// Print a section header.
pub fn section(title: &str) {
    println!();
    println!("{}", title.if_supports_color(Stream::Stdout, |t| t.bold()));
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    println!(
        "  {:<14} {}",
        label.if_supports_color(Stream::Stdout, |t| t.dimmed()),
        value
    );
}

/// Print a success line.
pub fn success(message: &str) {
    println!(
        "  {} {}",
        "✓".if_supports_color(Stream::Stdout, |t| t.green()),
        message
    );
}

/// Print a warning line.
pub fn warning(message: &str) {
    println!(
        "  {} {}",
        "⚠".if_supports_color(Stream::Stdout, |t| t.yellow()),
        message
    );
}

/// Print an error line.
pub fn error(message: &str) {
    eprintln!(
        "  {} {}",
        "×".if_supports_color(Stream::Stderr, |t| t.red()),
        message
    );
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("  {message}");
}

/// Indent every line of a rendered table.
pub fn table(rendered: &str) {
    for line in rendered.lines() {
        println!("  {line}");
    }
}

/// Signed value coloured green when positive and red when negative.
pub fn signed(value: f64, rendered: impl Display) -> String {
    let rendered = rendered.to_string();
    if value > 0.0 {
        rendered
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string()
    } else if value < 0.0 {
        rendered
            .if_supports_color(Stream::Stdout, |t| t.red())
            .to_string()
    } else {
        rendered
    }
}

/// Emphasised value.
pub fn highlight(value: impl Display) -> String {
    value
        .if_supports_color(Stream::Stdout, |t| t.cyan())
        .to_string()
}

/// Print a value as pretty JSON.
pub fn json<T: serde::Serialize>(value: &T) -> crate::error::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
