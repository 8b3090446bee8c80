use plotters::element::Pie;
use plotters::prelude::*;
use std::path::Path;

use super::canvas::{render_png, FONT};
use super::palette::MUTED;
use super::Chart;
use crate::model::TestRow;
use crate::stats::{first_seen_counts, sorted_by_count};

const START_ANGLE: f64 = 140.0;

pub(crate) fn draw(path: &Path, tests: &[TestRow]) -> anyhow::Result<()> {
    let counts = sorted_by_count(first_seen_counts(tests.iter().map(|t| t.status.as_str())));

    render_png(path, (800, 800), |root| {
        let area = root.titled(Chart::StatusPie.title(), (FONT, 26.0))?;
        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);

        if counts.is_empty() {
            area.draw_text(
                "no test results",
                &(FONT, 20.0).into_font().color(&BLACK),
                (center.0 - 70, center.1),
            )?;
            return Ok(());
        }

        let radius = f64::from(w.min(h)) * 0.35;
        let sizes: Vec<f64> = counts.iter().map(|(_, n)| *n as f64).collect();
        let colors: Vec<RGBColor> = (0..counts.len()).map(|i| MUTED.color(i)).collect();
        let labels: Vec<&str> = counts.iter().map(|(s, _)| s.as_str()).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(START_ANGLE);
        pie.label_style((FONT, 20.0).into_font().color(&BLACK));
        pie.percentages((FONT, 16.0).into_font().color(&WHITE));
        area.draw(&pie)?;
        Ok(())
    })
}
