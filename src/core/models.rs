//! Tabular data model shared by the fetcher, the preview and the exporters.

use std::fmt;

use crate::error::{PmaError, Result};

/// One row of cell values, one per retained column.
pub type Row = Vec<String>;

/// A result-table column as rendered by phpMyAdmin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header text shown to the user.
    pub name: String,
    /// Internal identifier from the header's `data-column` attribute.
    pub id: String,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// Caller-supplied allow-list of column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilter {
    names: Vec<String>,
}

impl ColumnFilter {
    /// Parse a comma-separated list; entries are trimmed and blanks dropped.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self::from_names(input.split(','))
    }

    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if !name.is_empty() && !out.iter().any(|n| n == name) {
                out.push(name.to_string());
            }
        }
        Self { names: out }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// A column is allowed when either its header text or its internal id is listed.
    #[must_use]
    pub fn allows(&self, column: &Column) -> bool {
        self.names
            .iter()
            .any(|n| *n == column.name || *n == column.id)
    }
}

/// Which server columns survive filtering, in server display order.
///
/// Built once from the first results page and used to project every row, so
/// all rows share the same width as the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    retained: Vec<usize>,
    headers: Vec<String>,
}

impl ColumnPlan {
    #[must_use]
    pub fn new(columns: &[Column], filter: Option<&ColumnFilter>) -> Self {
        let mut retained = Vec::new();
        let mut headers: Vec<String> = Vec::new();
        for (idx, column) in columns.iter().enumerate() {
            if filter.is_none_or(|f| f.allows(column)) {
                retained.push(idx);
                let header = unique_header(&headers, column);
                headers.push(header);
            }
        }
        Self { retained, headers }
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.retained.len()
    }

    /// Project raw cells onto the retained columns.
    ///
    /// Returns `None` when the row is empty after filtering. Short rows are
    /// padded with empty cells.
    #[must_use]
    pub fn project(&self, cells: &[String]) -> Option<Row> {
        if cells.is_empty() || self.retained.is_empty() {
            return None;
        }
        Some(
            self.retained
                .iter()
                .map(|&idx| cells.get(idx).cloned().unwrap_or_default())
                .collect(),
        )
    }
}

/// Header text for `column` that no earlier header uses: the display name,
/// else the internal id, else the display name with a numeric suffix.
fn unique_header(taken: &[String], column: &Column) -> String {
    let free = |name: &str| !taken.iter().any(|t| t == name);
    if free(&column.name) {
        return column.name.clone();
    }
    if !column.id.is_empty() && free(&column.id) {
        return column.id.clone();
    }
    (2..)
        .map(|n| format!("{}_{n}", column.name))
        .find(|candidate| free(candidate))
        .unwrap_or_else(|| column.name.clone())
}

/// Ordered column names plus rows of exactly that width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table, checking header names are unique and every row
    /// matches the header width.
    ///
    /// # Errors
    ///
    /// Returns [`PmaError::DuplicateColumn`] for the first repeated header
    /// name, or [`PmaError::ShapeMismatch`] for the first row of the wrong width.
    pub fn try_new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        if let Some(name) = columns
            .iter()
            .enumerate()
            .find_map(|(idx, name)| columns[..idx].contains(name).then_some(name))
        {
            return Err(PmaError::DuplicateColumn { name: name.clone() });
        }
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(PmaError::ShapeMismatch {
                row: idx,
                expected: columns.len(),
                found: row.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows.
    #[must_use]
    pub fn head(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} columns x {} rows", self.columns.len(), self.rows.len())
    }
}
