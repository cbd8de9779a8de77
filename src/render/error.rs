//! Error rendering for pma-export.
//!
//! Every error is shown the same way: the uniform `ERROR: ` prefix, the error
//! code, then the first fix suggestion when there is one.

use crate::error::PmaError;

use super::Reporter;

/// Render an error for stderr.
#[must_use]
pub fn render_error(error: &PmaError, reporter: &Reporter) -> String {
    let mut lines = vec![reporter.format_error(format!("{error} [{}]", error.error_code()))];

    if let Some(suggestion) = error.fix_suggestions().into_iter().next() {
        lines.push(format!("  {}", suggestion.context));
        for command in &suggestion.commands {
            lines.push(format!("  try: {command}"));
        }
        if let Some(prevention) = suggestion.prevention {
            lines.push(format!("  tip: {prevention}"));
        }
    }

    lines.join("\n")
}
