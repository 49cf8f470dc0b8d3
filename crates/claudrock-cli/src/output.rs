//! Terminal output helpers
//!
//! Replies go to stdout so they can be piped; everything else (status,
//! warnings, errors) goes to stderr with colors when stderr is a terminal.

use owo_colors::{AnsiColors, OwoColorize};
use std::env;

/// Output level for controlling what gets displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLevel {
    /// Show all output (normal mode)
    Normal,
    /// Show only errors (quiet mode)
    Quiet,
    /// Show extra detail such as usage and model ids
    Verbose,
}

impl OutputLevel {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if user-facing messages should be shown (errors and hints always show)
    pub fn show_user(&self) -> bool {
        matches!(self, Self::Normal | Self::Verbose)
    }

    pub fn show_detail(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}

fn colors_disabled() -> bool {
    env::var("NO_COLOR").is_ok()
        || env::var("TERM").is_ok_and(|t| t == "dumb")
        || !atty::is(atty::Stream::Stderr)
}

/// Whether stderr can host a spinner
pub fn interactive() -> bool {
    atty::is(atty::Stream::Stderr) && env::var("TERM").map_or(true, |t| t != "dumb")
}

fn labelled(label: &str, msg: &str, color: AnsiColors) {
    if colors_disabled() {
        eprintln!("{label} {msg}");
    } else {
        eprintln!("{} {}", label.color(color).bold(), msg.color(color));
    }
}

/// Print a heading with bold formatting
pub fn heading(msg: &str, output_level: OutputLevel) {
    if !output_level.show_user() {
        return;
    }
    if colors_disabled() {
        eprintln!("{msg}");
    } else {
        eprintln!("{}", msg.bold());
    }
}

/// Print a plain note (no prefix)
pub fn note(msg: &str, output_level: OutputLevel) {
    if output_level.show_user() {
        eprintln!("{msg}");
    }
}

/// Print a note only in verbose mode
pub fn detail(msg: &str, output_level: OutputLevel) {
    if output_level.show_detail() {
        if colors_disabled() {
            eprintln!("{msg}");
        } else {
            eprintln!("{}", msg.dimmed());
        }
    }
}

pub fn success(msg: &str, output_level: OutputLevel) {
    if !output_level.show_user() {
        return;
    }
    if colors_disabled() {
        eprintln!("{msg}");
    } else {
        eprintln!("{}", msg.green());
    }
}

/// Print a progress message with an ellipsis
pub fn progress(msg: &str, output_level: OutputLevel) {
    if !output_level.show_user() {
        return;
    }
    let msg = if msg.ends_with("...") || msg.ends_with('…') {
        msg.to_string()
    } else {
        format!("{msg}…")
    };
    if colors_disabled() {
        eprintln!("{msg}");
    } else {
        eprintln!("{}", msg.cyan());
    }
}

pub fn warning(msg: &str, output_level: OutputLevel) {
    if output_level.show_user() {
        labelled("Warning:", msg, AnsiColors::Yellow);
    }
}

/// Print an error message (always shown)
pub fn error(msg: &str, _output_level: OutputLevel) {
    labelled("Error:", msg, AnsiColors::Red);
}

/// Print a hint message (always shown)
pub fn hint(msg: &str, _output_level: OutputLevel) {
    labelled("Hint:", msg, AnsiColors::Blue);
}

pub fn format_model(model: &str) -> String {
    if colors_disabled() {
        model.to_string()
    } else {
        model.cyan().to_string()
    }
}

/// Format a command or option with colors
pub fn format_command(cmd: &str) -> String {
    if colors_disabled() {
        format!("`{cmd}`")
    } else {
        format!("`{}`", cmd.yellow().bold())
    }
}

/// First `limit` characters of `text`, with an ellipsis when cut
pub fn preview(text: &str, limit: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_level_from_flags() {
        assert_eq!(OutputLevel::from_flags(true, true), OutputLevel::Quiet);
        assert_eq!(OutputLevel::from_flags(false, true), OutputLevel::Verbose);
        assert_eq!(OutputLevel::from_flags(false, false), OutputLevel::Normal);
        assert!(!OutputLevel::Quiet.show_user());
        assert!(OutputLevel::Verbose.show_detail());
        assert!(!OutputLevel::Normal.show_detail());
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("héllo wörld", 4), "héll...");
    }
}
