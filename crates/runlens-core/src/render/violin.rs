use plotters::prelude::*;
use std::path::Path;

use super::canvas::{category_label, empty_chart, render_png, FONT, TITLE_SIZE};
use super::palette::MUTED;
use super::Chart;
use crate::config::ChartSettings;
use crate::model::TestRow;
use crate::stats::{extent, padded, GaussianKde, Quartiles};

/// Density tails extend this many bandwidths past each group's data.
const VIOLIN_CUT: f64 = 2.0;
/// Half the width of the widest violin, in category units.
const HALF_WIDTH: f64 = 0.4;

const X_DESC: &str = "Test Status";
const Y_DESC: &str = "Execution Time (s)";

/// Timed execution values per status, statuses in order of first appearance.
/// Statuses whose tests all lack timing still get a (empty) slot.
pub(crate) fn groups(tests: &[TestRow]) -> Vec<(String, Vec<f64>)> {
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for t in tests {
        let pos = match groups.iter().position(|(s, _)| s == t.status.as_str()) {
            Some(pos) => pos,
            None => {
                groups.push((t.status.to_string(), Vec::new()));
                groups.len() - 1
            }
        };
        if let Some(time) = t.execution_time {
            groups[pos].1.push(time);
        }
    }
    groups
}

/// Closed outline of one violin centered on `x`.
fn outline(x: f64, curve: &[(f64, f64)], scale: f64) -> Vec<(f64, f64)> {
    let right = curve.iter().map(|(y, d)| (x + d * scale, *y));
    let left = curve.iter().rev().map(|(y, d)| (x - d * scale, *y));
    right.chain(left).collect()
}

pub(crate) fn draw(path: &Path, tests: &[TestRow], settings: &ChartSettings) -> anyhow::Result<()> {
    let groups = groups(tests);
    let labels: Vec<String> = groups.iter().map(|(s, _)| s.clone()).collect();

    let estimates: Vec<Option<GaussianKde>> =
        groups.iter().map(|(_, v)| GaussianKde::new(v)).collect();
    let curves: Vec<Option<Vec<(f64, f64)>>> = estimates
        .iter()
        .map(|k| k.as_ref().map(|k| k.curve(settings.kde_grid_points, VIOLIN_CUT)))
        .collect();

    let mut span: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
    for k in estimates.iter().flatten() {
        let (lo, hi) = k.support(VIOLIN_CUT);
        span.push(lo);
        span.push(hi);
    }

    render_png(path, (1000, 600), |root| {
        let Some((lo, hi)) = extent(&span) else {
            return empty_chart(root, Chart::ExecutionViolin.title(), X_DESC, Y_DESC);
        };
        let (y0, y1) = padded(lo, hi, 0.05);
        let n = groups.len();

        let mut chart = ChartBuilder::on(root)
            .caption(Chart::ExecutionViolin.title(), (FONT, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5..n as f64 - 0.5, y0..y1)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|v| category_label(&labels, *v))
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .draw()?;

        // One area-preserving scale for all violins: the densest point of
        // any group spans the full half width.
        let peak = curves
            .iter()
            .flatten()
            .flat_map(|c| c.iter().map(|(_, d)| *d))
            .fold(0.0, f64::max);

        for (i, (_, values)) in groups.iter().enumerate() {
            let x = i as f64;
            let color = MUTED.color(i);

            match &curves[i] {
                Some(curve) if peak > 0.0 => {
                    let shape = outline(x, curve, HALF_WIDTH / peak);
                    let mut border = shape.clone();
                    border.extend(shape.first().copied());
                    chart.draw_series(std::iter::once(Polygon::new(shape, color.filled())))?;
                    chart.draw_series(std::iter::once(PathElement::new(
                        border,
                        BLACK.mix(0.6).stroke_width(1),
                    )))?;
                }
                _ => {
                    // Single value or no spread: a flat bar at each value.
                    chart.draw_series(values.iter().map(|v| {
                        PathElement::new(
                            vec![(x - HALF_WIDTH, *v), (x + HALF_WIDTH, *v)],
                            color.stroke_width(3),
                        )
                    }))?;
                }
            }

            if let Some(q) = Quartiles::new(values) {
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(x, q.lower_whisker), (x, q.upper_whisker)],
                    BLACK.stroke_width(1),
                )))?;
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(x - 0.03, q.q1), (x + 0.03, q.q3)],
                    RGBColor(60, 60, 60).filled(),
                )))?;
                chart.draw_series(std::iter::once(Circle::new(
                    (x, q.median),
                    4,
                    WHITE.filled(),
                )))?;
            }
        }
        Ok(())
    })
}
