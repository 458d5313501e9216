use std::fmt;

use colored::Colorize;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Highlight,
    Muted,
}

/// Styles CLI text, falling back to plain output when color is disabled.
pub struct Formatter {
    plain: bool,
}

impl Formatter {
    pub fn new(plain: bool) -> Self {
        Self { plain }
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        self.apply_style(Style::Header, format!("=== {} ===", title))
    }

    pub fn highlight_text(&self, message: impl fmt::Display) -> String {
        self.apply_style(Style::Highlight, message)
    }

    pub fn muted_text(&self, message: impl fmt::Display) -> String {
        self.apply_style(Style::Muted, message)
    }

    /// Left-aligns the first column and right-aligns amounts in the last.
    pub fn table_row(&self, columns: [&str; 3], widths: [usize; 3]) -> String {
        format!(
            "  {:<w0$}  {:<w1$}  {:>w2$}",
            columns[0],
            columns[1],
            columns[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        )
    }

    fn apply_style(&self, style: Style, message: impl fmt::Display) -> String {
        let text = message.to_string();
        if self.plain {
            return text;
        }
        match style {
            Style::Header => text.bold().to_string(),
            Style::Highlight => text.green().to_string(),
            Style::Muted => text.dimmed().to_string(),
        }
    }
}
