//! Semantic display styles and their terminal colors.

use colored::{ColoredString, Colorize};

/// How a piece of report text should look.
///
/// Row builders pick a style, `paint` decides what it means on the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Plain,
    Info,
    Success,
    Warning,
    Error,
    Muted,
    Emphasis,
    Header,
}

impl Style {
    pub fn paint(self, text: &str) -> ColoredString {
        match self {
            Style::Plain => text.normal(),
            Style::Info => text.cyan(),
            Style::Success => text.green().bold(),
            Style::Warning => text.red().bold(),
            Style::Error => text.yellow().bold(),
            Style::Muted => text.dimmed(),
            Style::Emphasis => text.blue().bold(),
            Style::Header => text.bold().reversed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_keeps_text() {
        for style in &[
            Style::Plain,
            Style::Info,
            Style::Success,
            Style::Warning,
            Style::Error,
            Style::Muted,
            Style::Emphasis,
            Style::Header,
        ] {
            assert!(style.paint("[OK]").to_string().contains("[OK]"));
        }
    }
}
