//! 2 × 2 pairwise matrix over the two model length columns: density on the
//! diagonal, scatter elsewhere with points colored by schema.

use plotters::prelude::*;
use std::path::Path;

use super::canvas::{render_png, Canvas, FONT};
use super::palette::DEEP;
use super::Chart;
use crate::config::ChartSettings;
use crate::model::ModelRow;
use crate::stats::{extent, first_seen_counts, padded, GaussianKde};

const VARIABLES: [&str; 2] = ["Unique ID Length", "File Path Length"];
const PAIR_CUT: f64 = 3.0;

struct Columns {
    values: [Vec<f64>; 2],
    schemas: Vec<String>,
    schema_of_row: Vec<usize>,
}

impl Columns {
    fn from_models(models: &[ModelRow]) -> Self {
        let schemas: Vec<String> = first_seen_counts(models.iter().map(|m| m.schema.as_str()))
            .into_iter()
            .map(|(s, _)| s)
            .collect();
        let schema_of_row = models
            .iter()
            .map(|m| schemas.iter().position(|s| *s == m.schema).unwrap_or(0))
            .collect();
        Self {
            values: [
                models.iter().map(|m| m.unique_id_length as f64).collect(),
                models.iter().map(|m| m.file_path_length as f64).collect(),
            ],
            schemas,
            schema_of_row,
        }
    }

    fn range(&self, var: usize) -> (f64, f64) {
        let (lo, hi) = extent(&self.values[var]).unwrap_or((0.0, 1.0));
        padded(lo, hi, 0.08)
    }
}

pub(crate) fn draw(path: &Path, models: &[ModelRow], settings: &ChartSettings) -> anyhow::Result<()> {
    let columns = Columns::from_models(models);

    render_png(path, (900, 900), |root| {
        let area = root.titled(Chart::ModelPairPlot.title(), (FONT, 24.0))?;
        let panels = area.split_evenly((2, 2));

        for (idx, panel) in panels.iter().enumerate() {
            let (row, col) = (idx / 2, idx % 2);
            if row == col {
                diagonal(panel, &columns, col, settings)?;
            } else {
                off_diagonal(panel, &columns, col, row, idx == 1)?;
            }
        }
        Ok(())
    })
}

fn diagonal(
    panel: &Canvas<'_>,
    columns: &Columns,
    var: usize,
    settings: &ChartSettings,
) -> anyhow::Result<()> {
    let kde = GaussianKde::new(&columns.values[var]);
    let (x0, x1) = match &kde {
        Some(k) => k.support(PAIR_CUT),
        None => columns.range(var),
    };
    let curve = kde
        .as_ref()
        .map(|k| k.curve(settings.kde_grid_points, PAIR_CUT))
        .unwrap_or_default();
    let peak = curve.iter().map(|(_, d)| *d).fold(0.0, f64::max);
    let top = if peak > 0.0 { peak * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(panel)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x0..x1, 0.0..top)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(VARIABLES[var])
        .y_desc("Density")
        .y_label_formatter(&|v| format!("{:.2}", v))
        .draw()?;

    if !curve.is_empty() {
        let color = DEEP.color(0);
        chart.draw_series(
            AreaSeries::new(curve.iter().copied(), 0.0, color.mix(0.3)).border_style(color),
        )?;
    }
    Ok(())
}

fn off_diagonal(
    panel: &Canvas<'_>,
    columns: &Columns,
    x_var: usize,
    y_var: usize,
    with_legend: bool,
) -> anyhow::Result<()> {
    let (x0, x1) = columns.range(x_var);
    let (y0, y1) = columns.range(y_var);

    let mut chart = ChartBuilder::on(panel)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x0..x1, y0..y1)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(VARIABLES[x_var])
        .y_desc(VARIABLES[y_var])
        .draw()?;

    for (s, schema) in columns.schemas.iter().enumerate() {
        let color = DEEP.color(s);
        let points: Vec<(f64, f64)> = columns
            .schema_of_row
            .iter()
            .enumerate()
            .filter(|(_, owner)| **owner == s)
            .map(|(row, _)| (columns.values[x_var][row], columns.values[y_var][row]))
            .collect();
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&p| Circle::new(p, 3, color.mix(0.8).filled())),
            )?
            .label(schema.as_str())
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    if with_legend && !columns.schemas.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .label_font((FONT, 12.0))
            .draw()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::testing::{assert_png, fonts_available, models};

    fn model(schema: &str, id_len: usize, path_len: usize) -> ModelRow {
        ModelRow {
            model_id: "model.x".into(),
            resource_type: "model".into(),
            materialized: "view".into(),
            schema: schema.into(),
            unique_id_length: id_len,
            file_path_length: path_len,
        }
    }

    #[test]
    fn test_columns_assign_rows_to_schemas() {
        let c = Columns::from_models(&[
            model("staging", 10, 20),
            model("marts", 12, 25),
            model("staging", 14, 30),
        ]);
        assert_eq!(c.schemas, vec!["staging", "marts"]);
        assert_eq!(c.schema_of_row, vec![0, 1, 0]);
        assert_eq!(c.values[1], vec![20.0, 25.0, 30.0]);
    }

    #[test]
    fn test_empty_columns_still_have_a_range() {
        let c = Columns::from_models(&[]);
        let (lo, hi) = c.range(0);
        assert!(lo < hi);
    }

    #[test]
    fn test_draw_writes_png() {
        if !fonts_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Chart::ModelPairPlot.file_name());

        draw(&path, &models(), &ChartSettings::default()).unwrap();
        assert_png(&path);
        // No rows still yields an image.
        draw(&path, &[], &ChartSettings::default()).unwrap();
        assert_png(&path);
    }
}
