//! Paginated fetch of a table's rendered result pages.
//!
//! Requests are strictly serial. The offset always advances by the page size
//! that was requested, following phpMyAdmin's own `pos` semantics, not by the
//! number of rows that came back.

use reqwest::Url;

use super::extract::{self, ResultsPage};
use super::models::{ColumnFilter, ColumnPlan, Row, Table};
use super::session::Session;
use crate::error::{PmaError, Result};
use crate::render::Reporter;

/// phpMyAdmin refuses larger `session_max_rows` values.
pub const MAX_PAGE_SIZE: usize = 250;

/// Row limit used when the caller does not choose one.
pub const DEFAULT_ROW_LIMIT: usize = 250;

/// Table read when the caller does not name one.
pub const DEFAULT_TABLE: &str = "users";

/// What to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub database: String,
    pub table: String,
    pub columns: Option<ColumnFilter>,
    pub limit: usize,
}

impl FetchRequest {
    #[must_use]
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: DEFAULT_TABLE.to_string(),
            columns: None,
            limit: DEFAULT_ROW_LIMIT,
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// An empty filter means "all columns".
    #[must_use]
    pub fn with_columns(mut self, columns: Option<ColumnFilter>) -> Self {
        self.columns = columns.filter(|c| !c.is_empty());
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Rows requested per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        page_size(self.limit)
    }
}

/// Page size for a given total: `min(limit, MAX_PAGE_SIZE)`.
#[must_use]
pub const fn page_size(limit: usize) -> usize {
    if limit < MAX_PAGE_SIZE {
        limit
    } else {
        MAX_PAGE_SIZE
    }
}

/// URL of the results view at offset `pos`.
///
/// # Errors
///
/// Returns error if the base URL cannot be joined.
pub fn results_url(base: &Url, request: &FetchRequest, pos: usize) -> Result<Url> {
    let mut url = base
        .join("index.php")
        .map_err(|e| PmaError::InvalidInput(format!("invalid base URL: {e}")))?;
    url.query_pairs_mut()
        .append_pair("route", "/sql")
        .append_pair("server", "1")
        .append_pair("db", &request.database)
        .append_pair("table", &request.table)
        .append_pair("pos", &pos.to_string())
        .append_pair("session_max_rows", &request.page_size().to_string());
    Ok(url)
}

/// Accumulates pages into a single table.
///
/// Headers and the column plan come from the first page that carries a
/// result grid; every later page is projected through the same plan.
#[derive(Debug, Default)]
pub struct PageAccumulator {
    plan: Option<ColumnPlan>,
    rows: Vec<Row>,
}

impl PageAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one page in; returns how many rows it contributed.
    pub fn push_page(&mut self, page: &ResultsPage, filter: Option<&ColumnFilter>) -> usize {
        let plan = self
            .plan
            .get_or_insert_with(|| ColumnPlan::new(&page.columns, filter));
        let before = self.rows.len();
        self.rows
            .extend(page.rows.iter().filter_map(|cells| plan.project(cells)));
        self.rows.len() - before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Truncate to `limit` rows and build the table.
    ///
    /// # Errors
    ///
    /// Returns [`PmaError::NoData`] when no headers were captured or no rows
    /// were accumulated.
    pub fn finish(mut self, request: &FetchRequest) -> Result<Table> {
        let no_data = || PmaError::NoData {
            database: request.database.clone(),
            table: request.table.clone(),
        };
        let plan = self.plan.ok_or_else(no_data)?;
        self.rows.truncate(request.limit);
        if plan.headers().is_empty() || self.rows.is_empty() {
            return Err(no_data());
        }
        Table::try_new(plan.headers().to_vec(), self.rows)
    }
}

/// Fetch up to `request.limit` rows.
///
/// Stops when enough rows were collected, when a page contributes no rows,
/// or when a response has no result grid.
///
/// # Errors
///
/// Returns [`PmaError::NoData`] for an empty result, or the transport error of
/// the first failing request.
pub async fn fetch_table(
    session: &Session,
    request: &FetchRequest,
    reporter: &Reporter,
) -> Result<Table> {
    reporter.info(format!(
        "Fetching up to {} rows from `{}`.{}",
        request.limit, request.database, request.table
    ));

    let page_size = request.page_size();
    let mut acc = PageAccumulator::new();
    let mut pos = 0;

    while acc.len() < request.limit {
        let url = results_url(session.base_url(), request, pos)?;
        reporter.info(format!("GET page @ pos={pos}"));
        tracing::debug!(%url, pos, page_size, "requesting results page");

        let html = session.get_html(&url).await?;
        let Some(page) = extract::parse_results_page(&html) else {
            tracing::debug!(pos, "no results table, treating as end of data");
            break;
        };

        let added = acc.push_page(&page, request.columns.as_ref());
        tracing::debug!(pos, added, total = acc.len(), "page parsed");
        reporter.info(format!("  {added} rows (total {})", acc.len()));
        if added == 0 {
            break;
        }
        pos += page_size;
    }

    let table = acc.finish(request)?;
    reporter.info(format!("Total rows fetched: {}", table.len()));
    Ok(table)
}
