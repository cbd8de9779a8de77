//! User-facing status lines.
//!
//! The color decision is carried by the [`Reporter`] value that gets passed
//! into every reporting call; nothing here touches process-wide state.

use std::fmt::Display;

use colored::Colorize;

/// Prefix on every error line.
pub const ERROR_PREFIX: &str = "ERROR: ";
/// Prefix on every info line.
pub const INFO_PREFIX: &str = "-> ";

/// Formats and prints info, heading, prompt and error lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reporter {
    use_color: bool,
    quiet: bool,
}

impl Reporter {
    #[must_use]
    pub const fn new(use_color: bool) -> Self {
        Self {
            use_color,
            quiet: false,
        }
    }

    /// A reporter that prints nothing (library use and tests).
    #[must_use]
    pub const fn quiet() -> Self {
        Self {
            use_color: false,
            quiet: true,
        }
    }

    #[must_use]
    pub const fn use_color(&self) -> bool {
        self.use_color
    }

    #[must_use]
    pub fn format_info(&self, msg: impl Display) -> String {
        let line = format!("{INFO_PREFIX}{msg}");
        if self.use_color {
            line.green().to_string()
        } else {
            line
        }
    }

    #[must_use]
    pub fn format_heading(&self, msg: impl Display) -> String {
        let line = msg.to_string();
        if self.use_color {
            line.magenta().bold().to_string()
        } else {
            line
        }
    }

    /// Question text; the export question is highlighted differently.
    #[must_use]
    pub fn format_prompt(&self, msg: impl Display, emphasis: bool) -> String {
        let line = msg.to_string();
        match (self.use_color, emphasis) {
            (false, _) => line,
            (true, false) => line.cyan().to_string(),
            (true, true) => line.yellow().to_string(),
        }
    }

    #[must_use]
    pub fn format_error(&self, msg: impl Display) -> String {
        let line = format!("{ERROR_PREFIX}{msg}");
        if self.use_color {
            line.red().bold().to_string()
        } else {
            line
        }
    }

    /// Print an info line to stdout.
    pub fn info(&self, msg: impl Display) {
        if !self.quiet {
            println!("{}", self.format_info(msg));
        }
    }

    /// Print a heading line to stdout.
    pub fn heading(&self, msg: impl Display) {
        if !self.quiet {
            println!("\n{}", self.format_heading(msg));
        }
    }

    /// Print a block of preformatted text to stdout.
    pub fn block(&self, text: &str) {
        if !self.quiet {
            println!("{text}");
        }
    }
}
