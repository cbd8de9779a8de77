//! Table export to spreadsheet, word-processor and PDF files.
//!
//! Each backend is an optional cargo feature. [`ExportFormat::is_available`]
//! is checked before any file is touched, so a compiled-out backend fails
//! with [`PmaError::ExportDependency`] and leaves no partial output behind.

#[cfg(feature = "docx")]
mod docx;
#[cfg(feature = "pdf")]
mod pdf;
#[cfg(feature = "xlsx")]
mod xlsx;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::models::Table;
use crate::error::{PmaError, Result};
use crate::render::Reporter;

/// Output format, chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Excel,
    Word,
    Pdf,
    None,
}

impl ExportFormat {
    /// Every format, in prompt order.
    pub const ALL: &'static [Self] = &[Self::Excel, Self::Pdf, Self::Word, Self::None];

    /// Strict parse of a format name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "excel" | "xlsx" => Some(Self::Excel),
            "word" | "docx" => Some(Self::Word),
            "pdf" => Some(Self::Pdf),
            "none" | "" => Some(Self::None),
            _ => None,
        }
    }

    /// Parse an interactive answer. Anything unrecognized means no export.
    #[must_use]
    pub fn from_choice(answer: &str) -> Self {
        Self::from_name(answer).unwrap_or(Self::None)
    }

    /// Name used on the command line and in prompts.
    #[must_use]
    pub const fn cli_name(self) -> &'static str {
        match self {
            Self::Excel => "excel",
            Self::Word => "word",
            Self::Pdf => "pdf",
            Self::None => "none",
        }
    }

    /// Name used in messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Excel => "Excel",
            Self::Word => "Word",
            Self::Pdf => "PDF",
            Self::None => "no export",
        }
    }

    /// Fixed output file name.
    #[must_use]
    pub const fn file_name(self) -> Option<&'static str> {
        match self {
            Self::Excel => Some("output.xlsx"),
            Self::Word => Some("output.docx"),
            Self::Pdf => Some("output.pdf"),
            Self::None => None,
        }
    }

    /// Cargo feature that provides the backend.
    #[must_use]
    pub const fn feature(self) -> Option<&'static str> {
        match self {
            Self::Excel => Some("xlsx"),
            Self::Word => Some("docx"),
            Self::Pdf => Some("pdf"),
            Self::None => None,
        }
    }

    /// Whether this binary was built with the backend for this format.
    #[must_use]
    pub const fn is_available(self) -> bool {
        match self {
            Self::Excel => cfg!(feature = "xlsx"),
            Self::Word => cfg!(feature = "docx"),
            Self::Pdf => cfg!(feature = "pdf"),
            Self::None => true,
        }
    }

    fn unavailable(self) -> PmaError {
        PmaError::ExportDependency {
            format: self.display_name(),
            feature: self.feature().unwrap_or_default(),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

/// The `[excel/pdf/word/none]` choice list shown in the prompt.
#[must_use]
pub fn choice_list() -> String {
    let names: Vec<&str> = ExportFormat::ALL.iter().map(|f| f.cli_name()).collect();
    format!("[{}]", names.join("/"))
}

/// Write `table` in `format` into `dir`, overwriting any previous file.
///
/// Returns the written path, or `None` for [`ExportFormat::None`].
///
/// # Errors
///
/// - [`PmaError::ExportDependency`] when the backend was compiled out
/// - [`PmaError::ExportFailed`] or [`PmaError::Io`] when writing fails
pub fn export_table(
    table: &Table,
    format: ExportFormat,
    dir: &Path,
    reporter: &Reporter,
) -> Result<Option<PathBuf>> {
    if !format.is_available() {
        return Err(format.unavailable());
    }
    let Some(file_name) = format.file_name() else {
        reporter.info("No export selected, done.");
        return Ok(None);
    };

    let path = dir.join(file_name);
    tracing::debug!(?path, %format, rows = table.len(), "exporting");
    match format {
        ExportFormat::Excel => write_excel(table, &path)?,
        ExportFormat::Word => write_word(table, &path)?,
        ExportFormat::Pdf => write_pdf(table, &path)?,
        ExportFormat::None => {}
    }

    let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or_default();
    reporter.info(format!(
        "{} saved to {} ({})",
        format.display_name(),
        path.display(),
        crate::util::format_bytes(size)
    ));
    Ok(Some(path))
}

fn export_failed(format: ExportFormat, err: impl fmt::Display) -> PmaError {
    PmaError::ExportFailed {
        format: format.display_name(),
        reason: err.to_string(),
    }
}

#[cfg(feature = "xlsx")]
fn write_excel(table: &Table, path: &Path) -> Result<()> {
    xlsx::write(table, path)
}

#[cfg(not(feature = "xlsx"))]
fn write_excel(_: &Table, _: &Path) -> Result<()> {
    Err(ExportFormat::Excel.unavailable())
}

#[cfg(feature = "docx")]
fn write_word(table: &Table, path: &Path) -> Result<()> {
    docx::write(table, path)
}

#[cfg(not(feature = "docx"))]
fn write_word(_: &Table, _: &Path) -> Result<()> {
    Err(ExportFormat::Word.unavailable())
}

#[cfg(feature = "pdf")]
fn write_pdf(table: &Table, path: &Path) -> Result<()> {
    pdf::write(table, path)
}

#[cfg(not(feature = "pdf"))]
fn write_pdf(_: &Table, _: &Path) -> Result<()> {
    Err(ExportFormat::Pdf.unavailable())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(ExportFormat::from_name(" Excel "), Some(ExportFormat::Excel));
        assert_eq!(ExportFormat::from_name("DOCX"), Some(ExportFormat::Word));
        assert_eq!(ExportFormat::from_name("pdf"), Some(ExportFormat::Pdf));
        assert_eq!(ExportFormat::from_name(""), Some(ExportFormat::None));
        assert_eq!(ExportFormat::from_name("csv"), None);
    }

    #[test]
    fn unrecognized_choice_is_no_export() {
        assert_eq!(ExportFormat::from_choice("exel"), ExportFormat::None);
    }

    #[test]
    fn choice_list_matches_prompt() {
        assert_eq!(choice_list(), "[excel/pdf/word/none]");
    }

    #[test]
    fn file_names_are_fixed() {
        assert_eq!(ExportFormat::Excel.file_name(), Some("output.xlsx"));
        assert_eq!(ExportFormat::Word.file_name(), Some("output.docx"));
        assert_eq!(ExportFormat::Pdf.file_name(), Some("output.pdf"));
        assert_eq!(ExportFormat::None.file_name(), None);
    }

    #[test]
    fn availability_follows_features() {
        assert_eq!(ExportFormat::Excel.is_available(), cfg!(feature = "xlsx"));
        assert_eq!(ExportFormat::Word.is_available(), cfg!(feature = "docx"));
        assert_eq!(ExportFormat::Pdf.is_available(), cfg!(feature = "pdf"));
        assert!(ExportFormat::None.is_available());
    }

    #[test]
    fn none_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let table = Table::try_new(vec!["a".to_string()], vec![vec!["1".to_string()]]).unwrap();
        let written =
            export_table(&table, ExportFormat::None, dir.path(), &Reporter::quiet()).unwrap();
        assert!(written.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
