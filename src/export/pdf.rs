//! PDF export: one grid table on US Letter pages with a shaded header row.
//!
//! Columns share the printable width evenly. Cell text wraps onto as many
//! lines as it needs and the row grows to fit, so every character of every
//! cell is drawn. Rows that do not fit flow onto a new page, which repeats
//! the header row.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb,
};

use super::{ExportFormat, export_failed};
use crate::core::models::Table;
use crate::error::Result;
use crate::util::wrap;

const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 15.0;
const CELL_PADDING: f32 = 1.5;
const CELL_PADDING_V: f32 = 1.7;
const LINE_HEIGHT: f32 = 3.6;
/// Baseline offset from the bottom of a text line.
const BASELINE_LIFT: f32 = 0.9;
const FONT_SIZE: f32 = 8.0;
/// Widest Helvetica glyph advance at [`FONT_SIZE`] for common text, in millimetres.
const CHAR_WIDTH: f32 = 1.5;
const GRID_THICKNESS: f32 = 0.5;
const HEADER_SHADE: f32 = 0.83;
const LAYER: &str = "Table";

/// Column geometry shared by every row.
struct Grid {
    col_width: f32,
    max_chars: usize,
}

/// One row, already wrapped into lines per cell.
struct LaidOutRow {
    cells: Vec<Vec<String>>,
    height: f32,
}

impl Grid {
    fn new(columns: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let col_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns.max(1) as f32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let max_chars = ((col_width - 2.0 * CELL_PADDING) / CHAR_WIDTH).floor().max(1.0) as usize;
        Self {
            col_width,
            max_chars,
        }
    }

    fn lay_out(&self, cells: &[String]) -> LaidOutRow {
        let cells: Vec<Vec<String>> = cells.iter().map(|c| wrap(c, self.max_chars)).collect();
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        #[allow(clippy::cast_precision_loss)]
        let height = LINE_HEIGHT * lines as f32 + 2.0 * CELL_PADDING_V;
        LaidOutRow { cells, height }
    }

    /// Draw one row whose top edge is at `top`.
    fn draw_row(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        row: &LaidOutRow,
        top: f32,
        header: bool,
    ) {
        let bottom = top - row.height;
        #[allow(clippy::cast_precision_loss)]
        let right = MARGIN + self.col_width * row.cells.len() as f32;

        if header {
            layer.set_fill_color(gray(HEADER_SHADE));
            layer.add_rect(
                Rect::new(Mm(MARGIN), Mm(bottom), Mm(right), Mm(top)).with_mode(PaintMode::Fill),
            );
            layer.set_fill_color(gray(0.0));
        }

        for (idx, lines) in row.cells.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let left = MARGIN + self.col_width * idx as f32;
            layer.add_line(outline(left, bottom, left + self.col_width, top));
            for (n, line) in lines.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let baseline = top - CELL_PADDING_V - LINE_HEIGHT * (n + 1) as f32 + BASELINE_LIFT;
                layer.use_text(
                    line.trim_end_matches('\n'),
                    FONT_SIZE,
                    Mm(left + CELL_PADDING),
                    Mm(baseline),
                    font,
                );
            }
        }
    }
}

fn gray(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

fn outline(left: f32, bottom: f32, right: f32, top: f32) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(left), Mm(bottom)), false),
            (Point::new(Mm(right), Mm(bottom)), false),
            (Point::new(Mm(right), Mm(top)), false),
            (Point::new(Mm(left), Mm(top)), false),
        ],
        is_closed: true,
    }
}

fn prepare(layer: &PdfLayerReference) {
    layer.set_outline_color(gray(0.0));
    layer.set_outline_thickness(GRID_THICKNESS);
    layer.set_fill_color(gray(0.0));
}

pub fn write(table: &Table, path: &Path) -> Result<()> {
    let fail = |e: printpdf::Error| export_failed(ExportFormat::Pdf, e);

    let (doc, page, layer) = PdfDocument::new("output", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(fail)?;
    let grid = Grid::new(table.columns().len());
    let header = grid.lay_out(table.columns());

    let mut layer = doc.get_page(page).get_layer(layer);
    prepare(&layer);
    let mut top = PAGE_HEIGHT - MARGIN;
    grid.draw_row(&layer, &font, &header, top, true);
    top -= header.height;
    let mut page_has_rows = false;

    for cells in table.rows() {
        let row = grid.lay_out(cells);
        // A row taller than a whole page is drawn anyway and runs off the bottom.
        if page_has_rows && top - row.height < MARGIN {
            let (page, index) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
            layer = doc.get_page(page).get_layer(index);
            prepare(&layer);
            top = PAGE_HEIGHT - MARGIN;
            grid.draw_row(&layer, &font, &header, top, true);
            top -= header.height;
        }
        grid.draw_row(&layer, &font, &row, top, false);
        top -= row.height;
        page_has_rows = true;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    doc.save(&mut writer).map_err(fail)
}
