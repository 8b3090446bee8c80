use plotters::prelude::*;
use std::path::Path;

use super::canvas::{empty_chart, render_png, FONT, TITLE_SIZE};
use super::palette::DEEP;
use super::Chart;
use crate::model::{TestRow, TestStatus};
use crate::stats::{extent, padded};

const X_DESC: &str = "Test Index";
const Y_DESC: &str = "Execution Time (s)";

/// Points grouped by status in order of first appearance. Rows without a
/// timing are left out but keep their index.
pub(crate) fn series_by_status(tests: &[TestRow]) -> Vec<(&TestStatus, Vec<(f64, f64)>)> {
    let mut series: Vec<(&TestStatus, Vec<(f64, f64)>)> = Vec::new();
    for (idx, t) in tests.iter().enumerate() {
        let pos = match series.iter().position(|(s, _)| *s == &t.status) {
            Some(pos) => pos,
            None => {
                series.push((&t.status, Vec::new()));
                series.len() - 1
            }
        };
        if let Some(time) = t.execution_time {
            series[pos].1.push((idx as f64, time));
        }
    }
    series
}

pub(crate) fn draw(path: &Path, tests: &[TestRow]) -> anyhow::Result<()> {
    let series = series_by_status(tests);
    let times: Vec<f64> = tests.iter().filter_map(|t| t.execution_time).collect();

    render_png(path, (1000, 600), |root| {
        let Some((t_lo, t_hi)) = extent(&times) else {
            return empty_chart(root, Chart::ExecutionScatter.title(), X_DESC, Y_DESC);
        };
        let (x0, x1) = padded(0.0, tests.len().saturating_sub(1) as f64, 0.03);
        let (y0, y1) = padded(t_lo, t_hi, 0.05);

        let mut chart = ChartBuilder::on(root)
            .caption(Chart::ExecutionScatter.title(), (FONT, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x0..x1, y0..y1)?;
        chart
            .configure_mesh()
            .light_line_style(WHITE)
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .draw()?;

        for (i, (status, points)) in series.iter().enumerate() {
            let color = DEEP.color(i);
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 5, color.mix(0.85).filled())),
                )?
                .label(status.as_str())
                .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT, 14.0))
            .draw()?;
        Ok(())
    })
}
