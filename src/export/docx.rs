//! Word export: a single table, header row then data rows, plain text cells.

use std::fs::File;
use std::path::Path;

use docx_rs::{Docx, Paragraph, Run, Table as DocxTable, TableCell, TableRow};

use super::{ExportFormat, export_failed};
use crate::core::models::Table;
use crate::error::Result;

fn text_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
}

fn text_row(cells: &[String]) -> TableRow {
    TableRow::new(cells.iter().map(|c| text_cell(c)).collect())
}

pub fn write(table: &Table, path: &Path) -> Result<()> {
    let mut rows = Vec::with_capacity(table.len() + 1);
    rows.push(text_row(table.columns()));
    rows.extend(table.rows().iter().map(|r| text_row(r)));

    let file = File::create(path)?;
    Docx::new()
        .add_table(DocxTable::new(rows))
        .build()
        .pack(file)
        .map_err(|e| export_failed(ExportFormat::Word, e))
}
