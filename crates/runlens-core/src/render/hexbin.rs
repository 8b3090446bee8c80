use plotters::prelude::*;
use std::path::Path;

use super::canvas::{colorbar, empty_chart, render_png, FONT, TITLE_SIZE};
use super::palette::BLUES;
use super::Chart;
use crate::config::ChartSettings;
use crate::model::ModelRow;
use crate::stats::HexGrid;

const X_DESC: &str = "Unique ID Length";
const Y_DESC: &str = "File Path Length";

pub(crate) fn draw(path: &Path, models: &[ModelRow], settings: &ChartSettings) -> anyhow::Result<()> {
    let points: Vec<(f64, f64)> = models
        .iter()
        .map(|m| (m.unique_id_length as f64, m.file_path_length as f64))
        .collect();
    let grid = HexGrid::bin(&points, settings.hexbin_gridsize);

    render_png(path, (1200, 800), |root| {
        let (plot_area, bar_area) = root.split_horizontally(1050u32);
        let Some(grid) = grid else {
            return empty_chart(&plot_area, Chart::Hexbin.title(), X_DESC, Y_DESC);
        };

        let ((x0, x1), (y0, y1)) = grid.bounds();
        let mut chart = ChartBuilder::on(&plot_area)
            .caption(Chart::Hexbin.title(), (FONT, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x0..x1, y0..y1)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .draw()?;

        let max = grid.max_count() as f64;
        chart.draw_series(grid.cells().iter().map(|cell| {
            let color = BLUES.sample(cell.count as f64 / max);
            Polygon::new(grid.vertices(cell), color.filled())
        }))?;

        colorbar(&bar_area, &BLUES, max, "Count")
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
        let path = dir.path().join(Chart::Hexbin.file_name());

        draw(&path, &models(), &ChartSettings::default()).unwrap();
        assert_png(&path);
        // No rows still yields an image.
        draw(&path, &[], &ChartSettings::default()).unwrap();
        assert_png(&path);
    }
}
