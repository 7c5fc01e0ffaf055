//! Terminal capability detection and utilities

use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as an alert (red); used for CITO priority markers
    fn alert(&self) -> String;
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as info (blue)
    fn info(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn alert(&self) -> String {
        paint(self.as_ref(), |text| text.fg::<css::Red>().to_string())
    }

    fn success(&self) -> String {
        paint(self.as_ref(), |text| text.fg::<css::Green>().to_string())
    }

    fn info(&self) -> String {
        paint(self.as_ref(), |text| text.fg::<css::LightBlue>().to_string())
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), |text| text.dimmed().to_string())
    }
}

fn paint(text: &str, style: impl Fn(&str) -> String) -> String {
    if supports_color() {
        style(text)
    } else {
        text.to_string()
    }
}
