//! Terminal capability detection and utilities

use owo_colors::{OwoColorize, colors::css};
use supports_color::Stream;

/// Detects whether colored output should be enabled on the given stream
fn supports_color(stream: Stream) -> bool {
    supports_color::on(stream).is_some()
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green), for stdout
    fn success(&self) -> String;
    /// Color as warning (amber), for stderr
    fn warning(&self) -> String;
    /// Dim the text, for stdout
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color(Stream::Stdout) {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color(Stream::Stderr) {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color(Stream::Stdout) {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}
