//! Login, pagination and HTML extraction.

pub mod extract;
pub mod fetcher;
pub mod http;
pub mod logging;
pub mod models;
pub mod session;

pub use extract::{ResultsPage, extract_token, has_login_form, parse_results_page};
pub use fetcher::{
    DEFAULT_ROW_LIMIT, DEFAULT_TABLE, FetchRequest, MAX_PAGE_SIZE, PageAccumulator, fetch_table,
    page_size, results_url,
};
pub use models::{Column, ColumnFilter, ColumnPlan, Row, Table};
pub use session::{Credentials, Session, base_url};
