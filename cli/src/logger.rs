use colored::*;
use console::Term;
use std::fmt::Display;

/// Terminal output helpers. Never instantiated, just a namespace.
/// Colour scheme: amber (245, 166, 35) for info, teal (0, 150, 136) for brand.
pub struct Logger;

impl Logger {
    /// Prints an info message with an amber bullet point.
    pub fn info<T: Display>(msg: T) {
        println!("{} {}", "•".truecolor(245, 166, 35).bold(), msg);
    }

    /// Prints a success message with a green checkmark.
    pub fn success<T: Display>(msg: T) {
        println!("{} {}", "✔".green().bold(), msg);
    }

    /// Prints an error message with a red X. Goes to stderr so scripts piping
    /// `frota list` only get names on stdout.
    pub fn error<T: Display>(msg: T) {
        eprintln!("{} {}", "✖".red().bold(), msg);
    }

    /// Prints a warning with a yellow warning symbol.
    pub fn warn<T: Display>(msg: T) {
        println!("{} {}", "⚠".yellow().bold(), msg);
    }

    /// Prints a section header, underlined, as wide as the terminal allows.
    pub fn header<T: Display>(msg: T) {
        let width = Term::stdout().size().1 as usize;
        let text = msg.to_string();
        let text = if width > 0 && text.chars().count() > width {
            text.chars().take(width).collect()
        } else {
            text
        };
        println!("\n{}", text.truecolor(0, 150, 136).bold().underline());
    }

    /// Returns a string in amber (for inline use).
    pub fn highlight<T: Display>(msg: T) -> String {
        msg.to_string().truecolor(245, 166, 35).bold().to_string()
    }

    /// Returns a string in brand teal, used for vehicle names.
    pub fn brand_text<T: Display>(msg: T) -> String {
        msg.to_string().truecolor(0, 150, 136).bold().to_string()
    }

    /// Returns a dimmed string (less important text).
    pub fn dim<T: Display>(msg: T) -> String {
        msg.to_string().dimmed().to_string()
    }
}
