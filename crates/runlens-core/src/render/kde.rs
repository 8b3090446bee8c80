use plotters::prelude::*;
use std::path::Path;

use super::canvas::{empty_chart, render_png, FONT, TITLE_SIZE};
use super::Chart;
use crate::config::ChartSettings;
use crate::model::TestRow;
use crate::stats::GaussianKde;

/// Bandwidths of padding past the data on each side of the curve.
pub(crate) const KDE_CUT: f64 = 3.0;

const X_DESC: &str = "Execution Time (s)";
const Y_DESC: &str = "Density";

pub(crate) fn draw(path: &Path, tests: &[TestRow], settings: &ChartSettings) -> anyhow::Result<()> {
    let times: Vec<f64> = tests.iter().filter_map(|t| t.execution_time).collect();
    let kde = GaussianKde::new(&times);

    render_png(path, (1000, 600), |root| {
        let Some(kde) = kde else {
            tracing::warn!(
                event = "runlens.chart.degenerate",
                chart = Chart::ExecutionKde.file_name(),
                samples = times.len(),
                "not enough spread in execution times for a density estimate"
            );
            return empty_chart(root, Chart::ExecutionKde.title(), X_DESC, Y_DESC);
        };

        let curve = kde.curve(settings.kde_grid_points, KDE_CUT);
        let (x0, x1) = kde.support(KDE_CUT);
        let peak = curve.iter().map(|(_, d)| *d).fold(0.0, f64::max);

        let mut chart = ChartBuilder::on(root)
            .caption(Chart::ExecutionKde.title(), (FONT, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x0..x1, 0.0..peak * 1.1)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .y_label_formatter(&|v| format!("{:.3}", v))
            .draw()?;

        chart.draw_series(
            AreaSeries::new(curve.iter().copied(), 0.0, RED.mix(0.25)).border_style(RED),
        )?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::testing::{assert_png, fonts_available, tests};

    #[test]
    fn test_draw_writes_png() {
        if !fonts_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Chart::ExecutionKde.file_name());

        draw(&path, &tests(), &ChartSettings::default()).unwrap();
        assert_png(&path);
        // No rows still yields an image.
        draw(&path, &[], &ChartSettings::default()).unwrap();
        assert_png(&path);
    }
}
