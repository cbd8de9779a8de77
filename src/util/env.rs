//! Environment detection utilities.

use std::io::IsTerminal;

/// Output stream whose terminal-ness decides coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    #[must_use]
    pub fn is_tty(self) -> bool {
        match self {
            Self::Stdout => std::io::stdout().is_terminal(),
            Self::Stderr => std::io::stderr().is_terminal(),
        }
    }
}

/// Check if stdin is interactive.
#[must_use]
pub fn stdin_is_tty() -> bool {
    std::io::stdin().is_terminal()
}

/// Check if color should be enabled for a stream.
#[must_use]
pub fn should_use_color_for(stream: Stream, no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }

    // https://no-color.org
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var("TERM").is_ok_and(|t| t == "dumb") {
        return false;
    }

    stream.is_tty()
}
