//! CLI argument parsing, interactive prompts and the export run.

pub mod args;
pub mod prompt;
pub mod run;

pub use args::{Cli, FormatArg, Scheme};
pub use prompt::Prompter;
pub use run::{RunSettings, execute, run};
