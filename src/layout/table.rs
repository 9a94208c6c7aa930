//! Grid table primitive.
//!
//! Draws a header row and body rows with fixed column widths, wrapping cell
//! text, and continues onto new pages (header repeated) when a row would
//! cross the bottom margin. A row taller than a whole page is split line by
//! line. Returns where the cursor ends up.

use tracing::debug;

use super::text::{line_height_mm, wrap_text, PT_TO_MM};
use super::{
    DocumentBuilder, Element, FontWeight, Shade, BOTTOM_MARGIN_MM, PAGE_HEIGHT_MM, TOP_MARGIN_MM,
};

/// Grid line thickness in points.
const GRID_LINE_PT: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub font_size: f32,
    pub head_font_size: f32,
    /// Cell padding in mm on every side.
    pub cell_padding: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub head: Vec<String>,
    pub body: Vec<Vec<String>>,
    /// Column widths in mm, one per column.
    pub column_widths: Vec<f32>,
    pub left: f32,
    pub style: TableStyle,
}

impl TableSpec {
    pub fn width(&self) -> f32 {
        self.column_widths.iter().sum()
    }
}

/// Result of drawing a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableOutcome {
    /// Cursor position just below the last row, on the last page drawn.
    pub final_y: f32,
    /// Body rows drawn.
    pub rows: usize,
    /// Pages the table touched, including the one it started on.
    pub pages: usize,
}

/// A row with its cells already wrapped to the column widths.
struct MeasuredRow {
    lines: Vec<Vec<String>>,
    height: f32,
}

fn measure(cells: &[String], spec: &TableSpec, size: f32, weight: FontWeight) -> MeasuredRow {
    let padding = spec.style.cell_padding;
    let lines: Vec<Vec<String>> = spec
        .column_widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let text = cells.get(i).map(String::as_str).unwrap_or("");
            wrap_text(text, size, weight, (width - 2.0 * padding).max(1.0))
        })
        .collect();
    let max_lines = lines.iter().map(Vec::len).max().unwrap_or(1);
    let height = max_lines as f32 * line_height_mm(size) + 2.0 * padding;
    MeasuredRow { lines, height }
}

/// Room needed below the cursor for the header and the start of the first
/// row. A row too tall for any page only needs its first line.
pub fn leading_height(spec: &TableSpec) -> f32 {
    let head = measure(&spec.head, spec, spec.style.head_font_size, FontWeight::Bold);
    let first = spec
        .body
        .first()
        .map(|row| measure(row, spec, spec.style.font_size, FontWeight::Regular));
    head.height + first.map(|row| first_piece_height(spec, &head, &row)).unwrap_or(0.0)
}

fn page_capacity(head: &MeasuredRow) -> f32 {
    PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM - TOP_MARGIN_MM - head.height
}

fn first_piece_height(spec: &TableSpec, head: &MeasuredRow, row: &MeasuredRow) -> f32 {
    if row.height > page_capacity(head) {
        line_height_mm(spec.style.font_size) + 2.0 * spec.style.cell_padding
    } else {
        row.height
    }
}

/// Draw `spec` starting at `start_y` and report where it ended.
pub fn draw_table(doc: &mut DocumentBuilder, start_y: f32, spec: &TableSpec) -> TableOutcome {
    let page_bottom = PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM;
    let head = measure(&spec.head, spec, spec.style.head_font_size, FontWeight::Bold);
    let body: Vec<MeasuredRow> = spec
        .body
        .iter()
        .map(|row| measure(row, spec, spec.style.font_size, FontWeight::Regular))
        .collect();

    let mut y = start_y;
    let mut pages = 1;

    // Header and first row stay together.
    let first_height = body
        .first()
        .map(|row| first_piece_height(spec, &head, row))
        .unwrap_or(0.0);
    if y + head.height + first_height > page_bottom {
        doc.add_page();
        y = TOP_MARGIN_MM;
        debug!("Table moved to page {}", doc.page_count());
    }

    y = draw_row(doc, spec, &head, y, true);
    let mut rows_on_page = 0;

    for row in &body {
        if row.height > page_capacity(&head) {
            y = draw_split_row(doc, spec, &head, row, y, &mut pages);
            rows_on_page = 1;
            continue;
        }
        if rows_on_page > 0 && y + row.height > page_bottom {
            y = continue_on_new_page(doc, spec, &head, &mut pages);
            rows_on_page = 0;
        }
        y = draw_row(doc, spec, row, y, false);
        rows_on_page += 1;
    }

    TableOutcome {
        final_y: y,
        rows: body.len(),
        pages,
    }
}

fn continue_on_new_page(doc: &mut DocumentBuilder, spec: &TableSpec, head: &MeasuredRow, pages: &mut usize) -> f32 {
    doc.add_page();
    *pages += 1;
    debug!("Table continued on page {}", doc.page_count());
    draw_row(doc, spec, head, TOP_MARGIN_MM, true)
}

/// Draw a row in as many pieces as it takes, each piece filling the rest of
/// its page, with the header repeated above every continuation.
fn draw_split_row(
    doc: &mut DocumentBuilder,
    spec: &TableSpec,
    head: &MeasuredRow,
    row: &MeasuredRow,
    start_y: f32,
    pages: &mut usize,
) -> f32 {
    let page_bottom = PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM;
    let padding = spec.style.cell_padding;
    let line_height = line_height_mm(spec.style.font_size);
    let total_lines = row.lines.iter().map(Vec::len).max().unwrap_or(1);

    let mut y = start_y;
    let mut next_line = 0;
    while next_line < total_lines {
        let fit = ((page_bottom - y - 2.0 * padding) / line_height).floor();
        if fit < 1.0 {
            y = continue_on_new_page(doc, spec, head, pages);
            continue;
        }
        let take = (fit as usize).min(total_lines - next_line);
        let piece = MeasuredRow {
            lines: row
                .lines
                .iter()
                .map(|cell| cell.iter().skip(next_line).take(take).cloned().collect())
                .collect(),
            height: take as f32 * line_height + 2.0 * padding,
        };
        y = draw_row(doc, spec, &piece, y, false);
        next_line += take;
        if next_line < total_lines {
            y = continue_on_new_page(doc, spec, head, pages);
        }
    }
    y
}

fn draw_row(doc: &mut DocumentBuilder, spec: &TableSpec, row: &MeasuredRow, y: f32, is_head: bool) -> f32 {
    let (size, weight, fill, text_color) = if is_head {
        (spec.style.head_font_size, FontWeight::Bold, Some(Shade::HEADER), Shade::WHITE)
    } else {
        (spec.style.font_size, FontWeight::Regular, None, Shade::BLACK)
    };
    let padding = spec.style.cell_padding;
    let line_height = line_height_mm(size);
    // Baseline of the first line sits roughly one cap height below the padding.
    let first_baseline = y + padding + size * PT_TO_MM * 0.8;

    let mut x = spec.left;
    for (width, lines) in spec.column_widths.iter().zip(&row.lines) {
        doc.push(Element::Rect {
            x,
            y,
            width: *width,
            height: row.height,
            fill,
            stroke: Some((Shade::GRID, GRID_LINE_PT)),
        });
        for (i, line) in lines.iter().enumerate().filter(|(_, l)| !l.is_empty()) {
            doc.push(Element::Text {
                text: line.clone(),
                x: x + padding,
                y: first_baseline + i as f32 * line_height,
                size,
                weight,
                color: text_color,
            });
        }
        x += width;
    }

    y + row.height
}
