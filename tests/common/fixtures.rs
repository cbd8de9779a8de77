//! HTML fixtures and wiremock helpers that stand in for a phpMyAdmin server.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::PathBuf;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pma_export::core::session::base_url;
use reqwest::Url;

/// Path phpMyAdmin is served under.
pub const PMA_INDEX: &str = "/phpmyadmin/index.php";
/// Token embedded in `login_page.html`.
pub const LOGIN_TOKEN: &str = "5a3c9e0f7d2b4e61";

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Read a fixture file by name.
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Render a results view in phpMyAdmin's markup.
///
/// `columns` are `(display name, data-column id)` pairs. Every row gets the
/// usual `print_ignore` action cells in front of its data cells.
pub fn results_page(columns: &[(&str, &str)], rows: &[Vec<String>]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html><body><div id=\"page_content\">\
         <table class=\"table table-striped table_results data ajax\"><thead><tr>\
         <th class=\"column_action print_ignore\">Options</th>",
    );
    for (name, id) in columns {
        let _ = write!(
            html,
            "<th class=\"column_heading\" data-column=\"{id}\"><a class=\"sortlink\">{name}</a></th>"
        );
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr><td class=\"print_ignore\"><a>Edit</a></td>");
        for cell in row {
            let _ = write!(html, "<td class=\"data\">{cell}</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div></body></html>");
    html
}

/// `count` rows of `(id, name)` starting at id `first`.
pub fn user_rows(first: usize, count: usize) -> Vec<Vec<String>> {
    (first..first + count)
        .map(|id| vec![id.to_string(), format!("user{id}")])
        .collect()
}

pub const USER_COLUMNS: &[(&str, &str)] = &[("id", "id"), ("name", "name")];

/// Base URL of the mocked phpMyAdmin.
pub fn mock_base_url(server: &MockServer) -> Url {
    base_url(false, &server.uri()).expect("mock base url")
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

/// Serve the login page on GET and `post_body` on the login POST.
pub async fn mount_login(server: &MockServer, post_body: &str) {
    Mock::given(method("GET"))
        .and(path(PMA_INDEX))
        .and(query_param("route", "/"))
        .respond_with(html(load_fixture("login_page.html")))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(PMA_INDEX))
        .and(query_param("route", "/"))
        .respond_with(html(post_body.to_string()))
        .mount(server)
        .await;
}

/// A login that succeeds.
pub async fn mount_successful_login(server: &MockServer) {
    mount_login(server, &load_fixture("login_success.html")).await;
}

/// Serve `body` for the results view at offset `pos`, expecting `hits` calls.
pub async fn mount_results(server: &MockServer, pos: usize, body: String, hits: u64) {
    Mock::given(method("GET"))
        .and(path(PMA_INDEX))
        .and(query_param("route", "/sql"))
        .and(query_param("pos", pos.to_string()))
        .respond_with(html(body))
        .expect(hits)
        .mount(server)
        .await;
}

/// Fail the test if any results page is requested.
pub async fn forbid_results(server: &MockServer) {
    Mock::given(method("GET"))
        .and(query_param("route", "/sql"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}
