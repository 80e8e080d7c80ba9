//! Console formatting for help listings and diagnostics

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1B[0m";
    pub const RED: &'static str = "\x1B[31m";
    pub const CYAN: &'static str = "\x1B[36m";
    pub const GRAY: &'static str = "\x1B[90m";
    pub const BOLD_GREEN: &'static str = "\x1B[1;32m";
}

/// Colorizes text with the given color
pub fn colorize(text: &str, color: &str) -> String {
    format!("{}{}{}", color, text, Colors::RESET)
}

/// Applies colors only when enabled, so the same rendering code serves
/// terminals and plain pipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.color {
            colorize(text, color)
        } else {
            text.to_string()
        }
    }

    /// Formats a header with bold green
    pub fn header(&self, text: &str) -> String {
        self.paint(text, Colors::BOLD_GREEN)
    }

    /// Formats a command name with cyan
    pub fn entity(&self, text: &str) -> String {
        self.paint(text, Colors::CYAN)
    }

    /// Formats secondary information with gray
    pub fn secondary(&self, text: &str) -> String {
        self.paint(text, Colors::GRAY)
    }

    /// Formats an error with red
    pub fn error(&self, text: &str) -> String {
        self.paint(text, Colors::RED)
    }
}
