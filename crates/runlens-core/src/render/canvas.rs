//! Drawing-surface lifecycle and the few layout helpers the charts share.

use anyhow::Context;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

use super::palette::ColorMap;

pub type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub(crate) const FONT: &str = "sans-serif";
pub(crate) const TITLE_SIZE: f64 = 22.0;

const NOTE_GREY: RGBColor = RGBColor(110, 110, 110);

/// Opens a PNG surface, lets `draw` fill it and writes it to `path`.
/// Drawing goes to a sibling `.partial.png` file, renamed into place only
/// when everything succeeded.
pub(crate) fn render_png<F>(path: &Path, size: (u32, u32), draw: F) -> anyhow::Result<()>
where
    F: FnOnce(&Canvas<'_>) -> anyhow::Result<()>,
{
    let partial = partial_path(path);
    match draw_into(&partial, size, draw) {
        Ok(()) => std::fs::rename(&partial, path)
            .with_context(|| format!("failed to write {}", path.display())),
        Err(e) => {
            // The backend flushes on drop even after a failed draw.
            let _ = std::fs::remove_file(&partial);
            Err(e)
        }
    }
}

/// The surface is dropped on every path out of this function, including
/// early returns from `draw`.
fn draw_into<F>(path: &Path, size: (u32, u32), draw: F) -> anyhow::Result<()>
where
    F: FnOnce(&Canvas<'_>) -> anyhow::Result<()>,
{
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    draw(&root)?;
    root.present()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.partial.png", stem))
}

pub(crate) fn centered(size: f64) -> TextStyle<'static> {
    (FONT, size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

/// Label for the category slot at `v`. Categories sit on integer positions;
/// ticks that fall between slots get no label.
pub(crate) fn category_label(labels: &[String], v: f64) -> String {
    const SLOT_EPS: f64 = 1e-6;
    let i = v.round();
    if i < 0.0 || (v - i).abs() > SLOT_EPS {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}

/// Axes with a centered note in place of data.
pub(crate) fn empty_chart(
    area: &Canvas<'_>,
    title: &str,
    x_desc: &str,
    y_desc: &str,
) -> anyhow::Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..1f64, 0f64..1f64)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;
    chart.draw_series(std::iter::once(Text::new(
        "no data",
        (0.5, 0.5),
        (FONT, 20.0)
            .into_font()
            .color(&NOTE_GREY)
            .pos(Pos::new(HPos::Center, VPos::Center)),
    )))?;
    Ok(())
}

/// Vertical color scale from zero to `max` with a labelled axis.
pub(crate) fn colorbar(area: &Canvas<'_>, map: &ColorMap, max: f64, label: &str) -> anyhow::Result<()> {
    const STEPS: usize = 100;
    let top = max.max(1.0);

    let mut bar = ChartBuilder::on(area)
        .margin_top(60)
        .margin_bottom(60)
        .margin_right(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..1f64, 0f64..top)?;
    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_desc(label)
        .draw()?;
    bar.draw_series((0..STEPS).map(|i| {
        let lo = top * i as f64 / STEPS as f64;
        let hi = top * (i + 1) as f64 / STEPS as f64;
        let t = (i as f64 + 0.5) / STEPS as f64;
        Rectangle::new([(0.0, lo), (1.0, hi)], map.sample(t).filled())
    }))?;
    Ok(())
}
