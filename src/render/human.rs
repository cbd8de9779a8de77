//! Human-readable table preview.

use crate::core::models::Table;
use crate::util::format::truncate;

/// Rows shown in the preview.
pub const PREVIEW_ROWS: usize = 5;

/// Widest a preview column may get before cells are cut.
pub const MAX_CELL_WIDTH: usize = 32;

/// Render the first [`PREVIEW_ROWS`] rows as a column-aligned text table.
#[must_use]
pub fn render_preview(table: &Table) -> String {
    render_rows(table, PREVIEW_ROWS)
}

/// Render the first `limit` rows, columns separated by two spaces.
#[must_use]
pub fn render_rows(table: &Table, limit: usize) -> String {
    let rows: Vec<Vec<String>> = table
        .head(limit)
        .iter()
        .map(|row| row.iter().map(|c| truncate(c, MAX_CELL_WIDTH)).collect())
        .collect();
    let headers: Vec<String> = table
        .columns()
        .iter()
        .map(|c| truncate(c, MAX_CELL_WIDTH))
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_line(&headers, &widths));
    for row in &rows {
        lines.push(format_line(row, &widths));
    }
    lines.join("\n")
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: usize) -> Table {
        let rows = (1..=rows)
            .map(|i| vec![i.to_string(), format!("user{i}")])
            .collect();
        Table::try_new(vec!["id".to_string(), "username".to_string()], rows).unwrap()
    }

    #[test]
    fn preview_shows_header_and_five_rows() {
        let out = render_preview(&table(8));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "id  username");
        assert_eq!(lines[1], "1   user1");
        assert_eq!(lines[5], "5   user5");
    }

    #[test]
    fn preview_of_short_table() {
        assert_eq!(render_preview(&table(2)).lines().count(), 3);
    }

    #[test]
    fn long_cells_are_cut() {
        let long = "x".repeat(100);
        let t = Table::try_new(vec!["c".to_string()], vec![vec![long]]).unwrap();
        let out = render_preview(&t);
        let row = out.lines().nth(1).unwrap();
        assert_eq!(row.chars().count(), MAX_CELL_WIDTH);
    }
}
