//! Excel export: one sheet, header row then data rows, no styling.

use std::path::Path;

use rust_xlsxwriter::Workbook;

use super::{ExportFormat, export_failed};
use crate::core::models::Table;
use crate::error::Result;

pub fn write(table: &Table, path: &Path) -> Result<()> {
    let fail = |e: rust_xlsxwriter::XlsxError| export_failed(ExportFormat::Excel, e);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in table.columns().iter().enumerate() {
        sheet
            .write_string(0, col_num(col)?, name.as_str())
            .map_err(fail)?;
    }
    for (idx, row) in table.rows().iter().enumerate() {
        let row_num = u32::try_from(idx + 1)
            .map_err(|_| export_failed(ExportFormat::Excel, "too many rows for a worksheet"))?;
        for (col, value) in row.iter().enumerate() {
            sheet
                .write_string(row_num, col_num(col)?, value.as_str())
                .map_err(fail)?;
        }
    }

    workbook.save(path).map_err(fail)
}

fn col_num(col: usize) -> Result<u16> {
    u16::try_from(col)
        .map_err(|_| export_failed(ExportFormat::Excel, "too many columns for a worksheet"))
}
