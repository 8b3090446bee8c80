use plotters::prelude::*;
use std::path::Path;

use super::canvas::{
    category_label, centered, colorbar, empty_chart, render_png, FONT, TITLE_SIZE,
};
use super::palette::YL_GN_BU;
use super::Chart;
use crate::model::ModelRow;
use crate::stats::CountMatrix;

const X_DESC: &str = "Materialization Type";
const Y_DESC: &str = "Schema";

pub(crate) fn draw(path: &Path, models: &[ModelRow]) -> anyhow::Result<()> {
    let matrix = CountMatrix::schema_by_materialization(models);

    render_png(path, (1200, 800), |root| {
        let (plot_area, bar_area) = root.split_horizontally(1050u32);
        if matrix.is_empty() {
            return empty_chart(&plot_area, Chart::SchemaHeatmap.title(), X_DESC, Y_DESC);
        }

        let ncols = matrix.columns.len();
        let nrows = matrix.rows.len();
        // First schema row is drawn at the top.
        let rows_top_down: Vec<String> = matrix.rows.iter().rev().cloned().collect();

        let mut chart = ChartBuilder::on(&plot_area)
            .caption(Chart::SchemaHeatmap.title(), (FONT, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(160)
            .build_cartesian_2d(-0.5..ncols as f64 - 0.5, -0.5..nrows as f64 - 0.5)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(ncols)
            .y_labels(nrows)
            .x_label_formatter(&|v| category_label(&matrix.columns, *v))
            .y_label_formatter(&|v| category_label(&rows_top_down, *v))
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .draw()?;

        let max = matrix.max().max(1) as f64;
        let cells: Vec<(f64, f64, usize)> = matrix
            .cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                let y = (nrows - 1 - r) as f64;
                row.iter()
                    .enumerate()
                    .map(move |(c, count)| (c as f64, y, *count))
            })
            .collect();

        chart.draw_series(cells.iter().map(|&(x, y, count)| {
            let color = YL_GN_BU.sample(count as f64 / max);
            Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], color.filled())
        }))?;
        chart.draw_series(cells.iter().map(|&(x, y, count)| {
            let style = if YL_GN_BU.is_dark_at(count as f64 / max) {
                centered(16.0).color(&WHITE)
            } else {
                centered(16.0)
            };
            Text::new(count.to_string(), (x, y), style)
        }))?;

        colorbar(&bar_area, &YL_GN_BU, max, "Count")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::testing::{assert_png, fonts_available, models};

    #[test]
    fn test_draw_writes_png() {
        if !fonts_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Chart::SchemaHeatmap.file_name());

        draw(&path, &models()).unwrap();
        assert_png(&path);
        // No rows still yields an image.
        draw(&path, &[]).unwrap();
        assert_png(&path);
    }
}
