use std::ops::Range;

use chrono::{DateTime, Utc};
use log::debug;

use crate::layout::format::{format_date, format_tick};
use crate::layout::{Align, Chromatogram, InfoField, PeakTable, ReportLayout};

use super::surface::{text_width, DrawSurface, Font};
use super::RenderError;

/// Page width in mm (A4 portrait)
pub const PAGE_WIDTH: f64 = 210.0;
/// Page height in mm (A4 portrait)
pub const PAGE_HEIGHT: f64 = 297.0;
/// Left and right margin in mm
pub const MARGIN: f64 = 20.0;

const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
const BODY_TOP: f64 = 32.0;
const BODY_BOTTOM: f64 = 262.0;
const FOOTER_TOP: f64 = 266.0;

const HEADING: f64 = 8.0;
const LINE: f64 = 4.6;
const GAP: f64 = 6.0;
const VALUE_OFFSET: f64 = 34.0;
const RIGHT_COLUMN: f64 = PAGE_WIDTH / 2.0 + 5.0;

const CHART_LEFT: f64 = MARGIN + 14.0;
const CHART_WIDTH: f64 = PAGE_WIDTH - MARGIN - CHART_LEFT;
const CHART_HEIGHT: f64 = 70.0;
const CHART_BLOCK: f64 = HEADING + 4.0 + CHART_HEIGHT + 14.0;

const TABLE_PREAMBLE: f64 = HEADING + LINE + 1.0;
const HEADER_ROW: f64 = 7.0;
const ROW: f64 = 6.0;
const TABLE_FONT: f64 = 8.0;

/// Per-render settings that are not part of the sample
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Value of the "Date Printed" field
    pub printed_at: DateTime<Utc>,
    /// Branding line at the top of each page
    pub branding: String,
    /// Software line under the branding
    pub software: String,
}

impl RenderOptions {
    /// Options printing the given date
    pub fn printed_at(printed_at: DateTime<Utc>) -> Self {
        Self {
            printed_at,
            branding: "Chromatography Data System".to_string(),
            software: format!("lcpeak v{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::printed_at(Utc::now())
    }
}

/// Rows of the peak table placed on one page
#[derive(Debug, Clone, PartialEq)]
pub struct TableChunk {
    /// 0-based page index
    pub page: usize,
    /// Range over the table rows; index `rows.len()` is the Total row
    pub rows: Range<usize>,
}

/// Page assignment computed before drawing
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// Number of pages in the document
    pub page_count: usize,
    /// Top of the peak table section on the first page
    pub table_top: f64,
    /// Table rows per page
    pub chunks: Vec<TableChunk>,
}

fn info_height(lines: usize) -> f64 {
    HEADING + lines as f64 * LINE + GAP
}

/// Draws a [`ReportLayout`] onto any [`DrawSurface`]
#[derive(Debug, Clone, Copy)]
pub struct ReportRenderer<'a> {
    layout: &'a ReportLayout,
    options: &'a RenderOptions,
}

impl<'a> ReportRenderer<'a> {
    /// Renderer for one layout
    pub fn new(layout: &'a ReportLayout, options: &'a RenderOptions) -> Self {
        Self { layout, options }
    }

    /// Decide page breaks for the peak table
    pub fn plan(&self) -> PagePlan {
        let layout = self.layout;
        let mut top = BODY_TOP
            + info_height(layout.sample_info.left.len().max(layout.sample_info.right.len()));
        if layout.chromatogram.is_some() {
            top += CHART_BLOCK;
        }
        if let Some(fields) = &layout.suitability {
            top += info_height((fields.len() + 1) / 2);
        }

        let Some(table) = &layout.table else {
            return PagePlan {
                page_count: 1,
                table_top: top,
                chunks: Vec::new(),
            };
        };

        let rows_fitting = |start: f64| {
            let space = BODY_BOTTOM - (start + TABLE_PREAMBLE + HEADER_ROW);
            if space > 0.0 {
                (space / ROW).floor() as usize
            } else {
                0
            }
        };
        let first = rows_fitting(top);
        let per_page = rows_fitting(BODY_TOP).max(1);

        // data rows plus the Total row
        let total_rows = table.rows.len() + 1;
        let mut chunks = Vec::new();
        let mut next = 0;
        let mut page = 0;
        if first > 0 {
            let end = first.min(total_rows);
            chunks.push(TableChunk { page, rows: 0..end });
            next = end;
        }
        while next < total_rows {
            page += 1;
            let end = (next + per_page).min(total_rows);
            chunks.push(TableChunk {
                page,
                rows: next..end,
            });
            next = end;
        }

        PagePlan {
            page_count: page + 1,
            table_top: top,
            chunks,
        }
    }

    /// Draw the whole document and finish the surface
    pub fn render<S: DrawSurface>(&self, mut surface: S) -> Result<S::Output, RenderError> {
        let plan = self.plan();
        let layout = self.layout;
        debug!(
            "Rendering report '{}' on {} page(s)",
            layout.title, plan.page_count
        );

        for page in 0..plan.page_count {
            if page > 0 {
                surface.new_page()?;
            }
            self.draw_header(&mut surface)?;

            let mut y = BODY_TOP;
            if page == 0 {
                y = self.draw_sample_info(&mut surface, y)?;
                if let Some(chart) = &layout.chromatogram {
                    y = self.draw_chromatogram(&mut surface, chart, y)?;
                }
                if let Some(fields) = &layout.suitability {
                    self.draw_suitability(&mut surface, fields, y)?;
                }
                y = plan.table_top;
            }

            if let (Some(table), Some(chunk)) = (
                &layout.table,
                plan.chunks.iter().find(|c| c.page == page),
            ) {
                self.draw_table(&mut surface, table, chunk, y)?;
            }

            self.draw_footer(&mut surface, page, plan.page_count)?;
        }

        surface.finish()
    }

    fn draw_header<S: DrawSurface>(&self, surface: &mut S) -> Result<(), RenderError> {
        surface.set_gray(0.0)?;
        surface.set_font(Font::Bold, 13.0)?;
        surface.text(MARGIN, 14.0, &self.options.branding)?;
        surface.set_font(Font::Regular, 9.0)?;
        surface.text(MARGIN, 19.5, &self.options.software)?;

        surface.set_font(Font::Bold, 15.0)?;
        let title = &self.layout.title;
        let x = PAGE_WIDTH - MARGIN - text_width(title, Font::Bold, 15.0);
        surface.text(x.max(MARGIN), 17.0, title)?;

        surface.line((MARGIN, 24.0), (PAGE_WIDTH - MARGIN, 24.0), 0.4)
    }

    fn draw_heading<S: DrawSurface>(surface: &mut S, text: &str, y: f64) -> Result<(), RenderError> {
        surface.set_font(Font::Bold, 11.0)?;
        surface.text(MARGIN, y + 4.0, text)?;
        surface.set_font(Font::Regular, 9.0)
    }

    fn draw_field<S: DrawSurface>(
        surface: &mut S,
        x: f64,
        y: f64,
        field: &InfoField,
    ) -> Result<(), RenderError> {
        surface.text(x, y, &field.label)?;
        surface.text(x + VALUE_OFFSET, y, &format!(": {}", field.value))
    }

    fn draw_sample_info<S: DrawSurface>(&self, surface: &mut S, y: f64) -> Result<f64, RenderError> {
        let info = &self.layout.sample_info;
        Self::draw_heading(surface, "<Sample Information>", y)?;

        let first_line = y + HEADING + 3.0;
        for (i, field) in info.left.iter().enumerate() {
            Self::draw_field(surface, MARGIN, first_line + i as f64 * LINE, field)?;
        }
        for (i, field) in info.right.iter().enumerate() {
            Self::draw_field(surface, RIGHT_COLUMN, first_line + i as f64 * LINE, field)?;
        }
        Ok(y + info_height(info.left.len().max(info.right.len())))
    }

    fn draw_chromatogram<S: DrawSurface>(
        &self,
        surface: &mut S,
        chart: &Chromatogram,
        y: f64,
    ) -> Result<f64, RenderError> {
        Self::draw_heading(surface, "<Chromatogram>", y)?;
        let label = &self.layout.detector_label;
        let label_x = CHART_LEFT + CHART_WIDTH - text_width(label, Font::Regular, 9.0);
        surface.text(label_x, y + 4.0, label)?;

        let top = y + HEADING + 4.0;
        let bottom = top + CHART_HEIGHT;
        let to_page = |(fx, fy): (f64, f64)| (CHART_LEFT + fx * CHART_WIDTH, bottom - fy * CHART_HEIGHT);

        surface.set_font(Font::Regular, 8.0)?;
        surface.text(CHART_LEFT - 12.0, top - 1.5, chart.units.label())?;

        // grid and signal ticks
        for &tick in &chart.y_axis.ticks {
            let (_, ty) = to_page((0.0, chart.y_axis.fraction(tick)));
            if tick > 0.0 && tick < chart.y_axis.max {
                surface.set_gray(0.8)?;
                surface.line((CHART_LEFT, ty), (CHART_LEFT + CHART_WIDTH, ty), 0.1)?;
                surface.set_gray(0.0)?;
            }
            surface.line((CHART_LEFT - 1.5, ty), (CHART_LEFT, ty), 0.2)?;
            let text = format_tick(tick);
            surface.text(CHART_LEFT - 2.5 - text_width(&text, Font::Regular, 8.0), ty + 1.0, &text)?;
        }

        // time ticks
        for &tick in &chart.x_axis.ticks {
            let (tx, _) = to_page((chart.x_axis.fraction(tick), 0.0));
            surface.line((tx, bottom), (tx, bottom + 1.5), 0.2)?;
            let text = format_tick(tick);
            surface.text(tx - text_width(&text, Font::Regular, 8.0) / 2.0, bottom + 5.0, &text)?;
        }
        let minutes = "Minutes";
        surface.text(
            CHART_LEFT + (CHART_WIDTH - text_width(minutes, Font::Regular, 8.0)) / 2.0,
            bottom + 10.5,
            minutes,
        )?;

        surface.rect(CHART_LEFT, top, CHART_WIDTH, CHART_HEIGHT, 0.4)?;

        surface.set_font(Font::Regular, 7.0)?;
        for curve in &chart.curves {
            let points: Vec<(f64, f64)> = curve.points.iter().copied().map(to_page).collect();
            surface.polyline(&points, 0.3)?;

            let (ax, ay) = to_page(curve.apex);
            let width = text_width(&curve.label, Font::Regular, 7.0);
            let lx = (ax - width / 2.0)
                .min(CHART_LEFT + CHART_WIDTH - width)
                .max(CHART_LEFT);
            surface.text(lx, (ay - 1.5).max(top + 3.0), &curve.label)?;
        }

        Ok(y + CHART_BLOCK)
    }

    fn draw_suitability<S: DrawSurface>(
        &self,
        surface: &mut S,
        fields: &[InfoField],
        y: f64,
    ) -> Result<f64, RenderError> {
        Self::draw_heading(surface, "<System Suitability>", y)?;
        let first_line = y + HEADING + 3.0;
        for (i, field) in fields.iter().enumerate() {
            let x = if i % 2 == 0 { MARGIN } else { RIGHT_COLUMN };
            Self::draw_field(surface, x, first_line + (i / 2) as f64 * LINE, field)?;
        }
        Ok(y + info_height((fields.len() + 1) / 2))
    }

    fn draw_table<S: DrawSurface>(
        &self,
        surface: &mut S,
        table: &PeakTable,
        chunk: &TableChunk,
        y: f64,
    ) -> Result<(), RenderError> {
        let heading = if chunk.rows.start == 0 {
            "<Peak Table>"
        } else {
            "<Peak Table> (continued)"
        };
        Self::draw_heading(surface, heading, y)?;
        surface.text(MARGIN, y + HEADING + LINE - 0.5, &self.layout.detector_label)?;

        let total_weight: f64 = table.columns.iter().map(|c| c.column.weight()).sum();
        let widths: Vec<f64> = table
            .columns
            .iter()
            .map(|c| c.column.weight() / total_weight * CONTENT_WIDTH)
            .collect();

        let header_top = y + TABLE_PREAMBLE;
        surface.rect(MARGIN, header_top, CONTENT_WIDTH, HEADER_ROW, 0.4)?;
        surface.set_font(Font::Bold, TABLE_FONT)?;
        let labels: Vec<&str> = table.columns.iter().map(|c| c.label.as_str()).collect();
        let aligns: Vec<Align> = table.columns.iter().map(|c| c.column.align()).collect();
        Self::draw_row(surface, &labels, &widths, &aligns, Font::Bold, header_top + 4.8)?;

        let mut row_top = header_top + HEADER_ROW;
        for index in chunk.rows.clone() {
            let (cells, font): (Vec<&str>, Font) = match table.rows.get(index) {
                Some(row) => (row.iter().map(String::as_str).collect(), Font::Regular),
                None => {
                    surface.line((MARGIN, row_top), (MARGIN + CONTENT_WIDTH, row_top), 0.4)?;
                    (table.total.iter().map(String::as_str).collect(), Font::Bold)
                }
            };
            surface.set_font(font, TABLE_FONT)?;
            Self::draw_row(surface, &cells, &widths, &aligns, font, row_top + 4.2)?;
            row_top += ROW;
            surface.set_gray(0.7)?;
            surface.line((MARGIN, row_top), (MARGIN + CONTENT_WIDTH, row_top), 0.1)?;
            surface.set_gray(0.0)?;
        }
        Ok(())
    }

    fn draw_row<S: DrawSurface>(
        surface: &mut S,
        cells: &[&str],
        widths: &[f64],
        aligns: &[Align],
        font: Font,
        baseline: f64,
    ) -> Result<(), RenderError> {
        let mut x = MARGIN;
        for ((cell, &width), &align) in cells.iter().zip(widths).zip(aligns) {
            let text_w = text_width(cell, font, TABLE_FONT);
            let tx = match align {
                Align::Left => x + 1.0,
                Align::Center => x + (width - text_w) / 2.0,
                Align::Right => x + width - text_w - 1.0,
            };
            surface.text(tx, baseline, cell)?;
            x += width;
        }
        Ok(())
    }

    fn draw_footer<S: DrawSurface>(
        &self,
        surface: &mut S,
        page: usize,
        page_count: usize,
    ) -> Result<(), RenderError> {
        surface.line((MARGIN, FOOTER_TOP), (PAGE_WIDTH - MARGIN, FOOTER_TOP), 0.3)?;
        surface.set_font(Font::Regular, 8.0)?;

        let printed = InfoField {
            label: "Date Printed".to_string(),
            value: format_date(Some(&self.options.printed_at)),
        };
        for (i, field) in self.layout.footer.iter().chain(std::iter::once(&printed)).enumerate() {
            let x = if i % 2 == 0 { MARGIN } else { RIGHT_COLUMN };
            let y = FOOTER_TOP + 5.0 + (i / 2) as f64 * 4.5;
            surface.text(x, y, &format!("{}: {}", field.label, field.value))?;
        }

        let last = FOOTER_TOP + 5.0 + 3.0 * 4.5;
        surface.text(MARGIN, last, &self.layout.source_filename)?;
        let page_text = format!("Page: {} of {}", page + 1, page_count);
        surface.text(
            PAGE_WIDTH - MARGIN - text_width(&page_text, Font::Regular, 8.0),
            last,
            &page_text,
        )
    }
}
