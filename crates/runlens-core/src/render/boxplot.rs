use plotters::prelude::*;
use std::path::Path;

use super::canvas::{category_label, empty_chart, render_png, FONT, TITLE_SIZE};
use super::palette::SET2;
use super::Chart;
use crate::model::ModelRow;
use crate::stats::{extent, padded, Quartiles};

const X_DESC: &str = "Type";
const Y_DESC: &str = "Length";
const BOX_HALF_WIDTH: f64 = 0.4;
const CAP_HALF_WIDTH: f64 = 0.1;

fn outline() -> ShapeStyle {
    RGBColor(60, 60, 60).stroke_width(2)
}

pub(crate) fn draw(path: &Path, models: &[ModelRow]) -> anyhow::Result<()> {
    let series: [(&str, Vec<f64>); 2] = [
        (
            "Unique ID Length",
            models.iter().map(|m| m.unique_id_length as f64).collect(),
        ),
        (
            "File Path Length",
            models.iter().map(|m| m.file_path_length as f64).collect(),
        ),
    ];
    let labels: Vec<String> = series.iter().map(|(l, _)| l.to_string()).collect();
    let all: Vec<f64> = series.iter().flat_map(|(_, v)| v.iter().copied()).collect();

    render_png(path, (1200, 800), |root| {
        let Some((lo, hi)) = extent(&all) else {
            return empty_chart(root, Chart::LengthBoxplot.title(), X_DESC, Y_DESC);
        };
        let (y0, y1) = padded(lo, hi, 0.05);

        let mut chart = ChartBuilder::on(root)
            .caption(Chart::LengthBoxplot.title(), (FONT, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..series.len() as f64 - 0.5, y0..y1)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(series.len())
            .x_label_formatter(&|v| category_label(&labels, *v))
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .draw()?;

        for (i, (_, values)) in series.iter().enumerate() {
            let Some(q) = Quartiles::new(values) else {
                continue;
            };
            let x = i as f64;
            let (left, right) = (x - BOX_HALF_WIDTH, x + BOX_HALF_WIDTH);

            chart.draw_series(std::iter::once(Rectangle::new(
                [(left, q.q1), (right, q.q3)],
                SET2.color(i).filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(left, q.q1), (right, q.q3)],
                outline(),
            )))?;
            chart.draw_series(
                [
                    vec![(left, q.median), (right, q.median)],
                    vec![(x, q.q3), (x, q.upper_whisker)],
                    vec![(x, q.q1), (x, q.lower_whisker)],
                    vec![
                        (x - CAP_HALF_WIDTH, q.upper_whisker),
                        (x + CAP_HALF_WIDTH, q.upper_whisker),
                    ],
                    vec![
                        (x - CAP_HALF_WIDTH, q.lower_whisker),
                        (x + CAP_HALF_WIDTH, q.lower_whisker),
                    ],
                ]
                .into_iter()
                .map(|segment| PathElement::new(segment, outline())),
            )?;
            chart.draw_series(
                q.outliers
                    .iter()
                    .map(|v| Circle::new((x, *v), 4, RGBColor(60, 60, 60).stroke_width(1))),
            )?;
        }
        Ok(())
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
        let path = dir.path().join(Chart::LengthBoxplot.file_name());

        draw(&path, &models()).unwrap();
        assert_png(&path);
        // No rows still yields an image.
        draw(&path, &[]).unwrap();
        assert_png(&path);
    }
}
