use plotters::prelude::*;
use std::path::Path;

use super::canvas::{category_label, centered, empty_chart, render_png, FONT, TITLE_SIZE};
use super::palette::PASTEL;
use super::Chart;
use crate::model::ModelRow;
use crate::stats::first_seen_counts;

const X_DESC: &str = "Resource Type";
const Y_DESC: &str = "Count";
const BAR_HALF_WIDTH: f64 = 0.4;

/// Node count per resource kind, kinds in manifest order.
pub(crate) fn resource_type_counts(models: &[ModelRow]) -> Vec<(String, usize)> {
    first_seen_counts(models.iter().map(|m| m.resource_type.as_str()))
}

pub(crate) fn draw(path: &Path, models: &[ModelRow]) -> anyhow::Result<()> {
    let counts = resource_type_counts(models);
    let labels: Vec<String> = counts.iter().map(|(k, _)| k.clone()).collect();

    render_png(path, (1200, 800), |root| {
        if counts.is_empty() {
            return empty_chart(root, Chart::ResourceTypes.title(), X_DESC, Y_DESC);
        }
        let n = counts.len();
        let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(1) as f64;

        let mut chart = ChartBuilder::on(root)
            .caption(Chart::ResourceTypes.title(), (FONT, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5..n as f64 - 0.5, 0.0..max * 1.1)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|v| category_label(&labels, *v))
            .y_label_formatter(&|v| format!("{:.0}", v))
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
            let x = i as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, *count as f64)],
                PASTEL.color(i).filled(),
            )
        }))?;
        chart.draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
            let x = i as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, *count as f64)],
                BLACK.mix(0.5).stroke_width(1),
            )
        }))?;
        chart.draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
            Text::new(
                count.to_string(),
                (i as f64, *count as f64 + max * 0.03),
                centered(15.0),
            )
        }))?;
        Ok(())
    })
}
