use plotters::prelude::*;
use std::path::Path;

use super::canvas::{centered, render_png, FONT};
use super::Chart;
use crate::metrics::MetricsTable;

const HEADER: [&str; 2] = ["Metric", "Value"];
const ROW_HEIGHT: i32 = 36;
const HEADER_FILL: RGBColor = RGBColor(0xe8, 0xee, 0xf6);
const GRID: RGBColor = RGBColor(0x33, 0x33, 0x33);

/// Draws the metrics as a bordered two-column table centered on the page.
pub(crate) fn draw(path: &Path, metrics: &MetricsTable) -> anyhow::Result<()> {
    let body: Vec<[String; 2]> = metrics
        .rows
        .iter()
        .map(|r| [r.name.to_string(), r.value.to_string()])
        .collect();

    render_png(path, (1000, 600), |root| {
        let area = root.titled(Chart::MetricsTable.title(), (FONT, 24.0))?;
        let (w, h) = area.dim_in_pixel();
        let (w, h) = (w as i32, h as i32);

        let table_width = w * 4 / 5;
        let col_widths = [table_width * 3 / 5, table_width * 2 / 5];
        let rows = body.len() as i32 + 1;
        let left = (w - table_width) / 2;
        let top = ((h - rows * ROW_HEIGHT) / 2).max(0);

        let header = HEADER.map(String::from);
        for (r, cells) in std::iter::once(&header).chain(body.iter()).enumerate() {
            let y0 = top + r as i32 * ROW_HEIGHT;
            let mut x0 = left;
            for (c, text) in cells.iter().enumerate() {
                let x1 = x0 + col_widths[c];
                let fill = if r == 0 { HEADER_FILL } else { WHITE };
                area.draw(&Rectangle::new([(x0, y0), (x1, y0 + ROW_HEIGHT)], fill.filled()))?;
                area.draw(&Rectangle::new(
                    [(x0, y0), (x1, y0 + ROW_HEIGHT)],
                    GRID.stroke_width(1),
                ))?;
                area.draw_text(
                    text,
                    &centered(16.0),
                    ((x0 + x1) / 2, y0 + ROW_HEIGHT / 2),
                )?;
                x0 = x1;
            }
        }
        Ok(())
    })
}
