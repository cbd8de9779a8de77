//! HTML extraction for phpMyAdmin pages.
//!
//! The selectors below are the integration contract with phpMyAdmin's
//! server-rendered markup. They are covered by contract tests against the
//! fixture corpus in `tests/fixtures/`.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::models::Column;

/// Hidden input carrying the CSRF token on the login form.
pub const TOKEN_SELECTOR: &str = r#"input[name="token"]"#;
/// The rendered result grid.
pub const RESULTS_TABLE_SELECTOR: &str = "table.table_results";
/// Header cells that map to a real table column.
pub const HEADER_SELECTOR: &str = "th[data-column]";
/// Data rows inside the result grid.
pub const ROW_SELECTOR: &str = "tbody tr";
/// Cell selector within a row.
pub const CELL_SELECTOR: &str = "td";
/// Attribute holding a column's internal identifier.
pub const COLUMN_ID_ATTR: &str = "data-column";
/// Class phpMyAdmin puts on action/checkbox cells that are not data.
pub const NON_EXPORTABLE_CLASS: &str = "print_ignore";
/// Case-insensitive marker of the login form in older and current themes.
pub const LOGIN_MARKER: &str = "loginform";
/// Elements that only exist while the login form is displayed.
pub const LOGIN_FORM_SELECTOR: &str =
    r#"#login_form, form[name="login_form"], input[name="pma_password"]"#;

fn compile(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

static TOKEN: LazyLock<Selector> = LazyLock::new(|| compile(TOKEN_SELECTOR));
static RESULTS_TABLE: LazyLock<Selector> = LazyLock::new(|| compile(RESULTS_TABLE_SELECTOR));
static HEADER: LazyLock<Selector> = LazyLock::new(|| compile(HEADER_SELECTOR));
static ROW: LazyLock<Selector> = LazyLock::new(|| compile(ROW_SELECTOR));
static CELL: LazyLock<Selector> = LazyLock::new(|| compile(CELL_SELECTOR));
static LOGIN_FORM: LazyLock<Selector> = LazyLock::new(|| compile(LOGIN_FORM_SELECTOR));

/// One parsed results page, before column filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsPage {
    pub columns: Vec<Column>,
    /// Exportable cell text per row, in server column order.
    pub rows: Vec<Vec<String>>,
}

/// Text content with each fragment trimmed and fragments joined without separator.
fn element_text(el: &ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Read the CSRF token from a login page.
#[must_use]
pub fn extract_token(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    doc.select(&TOKEN)
        .find_map(|input| input.value().attr("value"))
        .map(str::to_string)
}

/// Whether the page still shows the login form.
#[must_use]
pub fn has_login_form(html: &str) -> bool {
    if html.to_ascii_lowercase().contains(LOGIN_MARKER) {
        return true;
    }
    Html::parse_document(html).select(&LOGIN_FORM).next().is_some()
}

/// Parse a results view. `None` means the page has no result grid.
#[must_use]
pub fn parse_results_page(html: &str) -> Option<ResultsPage> {
    let doc = Html::parse_document(html);
    let table = doc.select(&RESULTS_TABLE).next()?;

    let columns = table
        .select(&HEADER)
        .map(|th| {
            Column::new(
                element_text(&th),
                th.value().attr(COLUMN_ID_ATTR).unwrap_or_default(),
            )
        })
        .collect();

    let rows = table
        .select(&ROW)
        .map(|tr| {
            tr.select(&CELL)
                .filter(|td| !td.value().classes().any(|c| c == NON_EXPORTABLE_CLASS))
                .map(|td| element_text(&td))
                .collect()
        })
        .collect();

    Some(ResultsPage { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_read_from_hidden_input() {
        let html = r#"<form><input type="hidden" name="token" value="abc123"></form>"#;
        assert_eq!(extract_token(html).as_deref(), Some("abc123"));
    }

    #[test]
    fn token_absent() {
        assert_eq!(extract_token("<form><input name=\"other\"></form>"), None);
    }

    #[test]
    fn login_marker_is_case_insensitive() {
        assert!(has_login_form("<div class=\"LoginForm\"></div>"));
        assert!(has_login_form(r#"<form id="login_form"></form>"#));
        assert!(has_login_form(r#"<input type="password" name="pma_password">"#));
        assert!(!has_login_form("<div id=\"page_content\">Welcome</div>"));
    }

    #[test]
    fn results_text_joins_trimmed_fragments() {
        let html = r#"
            <table class="table_results">
              <thead><tr><th class="print_ignore"></th><th data-column="name"> <a>name</a> <span>▲</span></th></tr></thead>
              <tbody><tr><td class="print_ignore"><a>Edit</a></td><td class="data"> Ann <em>B</em> </td></tr></tbody>
            </table>"#;
        let page = parse_results_page(html).unwrap();
        assert_eq!(page.columns, vec![Column::new("name▲", "name")]);
        assert_eq!(page.rows, vec![vec!["AnnB".to_string()]]);
    }

    #[test]
    fn missing_grid_is_none() {
        assert_eq!(parse_results_page("<table class=\"other\"></table>"), None);
    }

    #[test]
    fn rows_outside_tbody_are_ignored() {
        let html = r#"<table class="table_results"><thead><tr><td>header td</td></tr></thead>
            <tbody><tr><td>1</td></tr></tbody></table>"#;
        let page = parse_results_page(html).unwrap();
        assert_eq!(page.rows, vec![vec!["1".to_string()]]);
    }
}
