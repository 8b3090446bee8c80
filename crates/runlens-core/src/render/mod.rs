//! Chart rendering. Every chart is independent: it reads the shared tables,
//! owns its own drawing surface and writes exactly one PNG.

mod bar;
mod boxplot;
pub mod canvas;
mod heatmap;
mod hexbin;
mod kde;
pub mod palette;
mod pair;
mod pie;
mod scatter;
mod table;
mod violin;

use anyhow::Context;
use std::path::{Path, PathBuf};

use crate::config::ChartSettings;
use crate::metrics::MetricsTable;
use crate::model::{ModelRow, TestRow};
use crate::on_error::{log_chart_failure, ChartErrorPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chart {
    Hexbin,
    SchemaHeatmap,
    StatusPie,
    ExecutionScatter,
    ExecutionKde,
    ExecutionViolin,
    ModelPairPlot,
    ResourceTypes,
    LengthBoxplot,
    MetricsTable,
}

impl Chart {
    /// Render order.
    pub const ALL: [Chart; 10] = [
        Chart::Hexbin,
        Chart::SchemaHeatmap,
        Chart::StatusPie,
        Chart::ExecutionScatter,
        Chart::ExecutionKde,
        Chart::ExecutionViolin,
        Chart::ModelPairPlot,
        Chart::ResourceTypes,
        Chart::LengthBoxplot,
        Chart::MetricsTable,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Chart::Hexbin => "hexbin_plot.png",
            Chart::SchemaHeatmap => "heatmap_schema_materialization.png",
            Chart::StatusPie => "test_results_status_pie.png",
            Chart::ExecutionScatter => "test_execution_times_scatter.png",
            Chart::ExecutionKde => "execution_times_kde.png",
            Chart::ExecutionViolin => "execution_times_violin.png",
            Chart::ModelPairPlot => "pair_plot_models.png",
            Chart::ResourceTypes => "resource_types_distribution.png",
            Chart::LengthBoxplot => "boxplot_lengths.png",
            Chart::MetricsTable => "metrics_table.png",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Chart::Hexbin => "Hexagonal Bin Plot of Unique ID and File Path Lengths",
            Chart::SchemaHeatmap => "Heatmap of Schema vs Materialization",
            Chart::StatusPie => "Test Results Status Distribution",
            Chart::ExecutionScatter => "Scatter Plot of Test Execution Times",
            Chart::ExecutionKde => "KDE Plot of Test Execution Times",
            Chart::ExecutionViolin => "Violin Plot of Test Execution Times by Status",
            Chart::ModelPairPlot => "Pair Plot of Model DataFrame Attributes",
            Chart::ResourceTypes => "Distribution of Resource Types in dbt Manifest",
            Chart::LengthBoxplot => "Box Plot of Unique IDs and File Paths Lengths",
            Chart::MetricsTable => "DBT Data Quality Metrics",
        }
    }

    /// File stem, e.g. `hexbin_plot`.
    pub fn name(self) -> &'static str {
        self.file_name().trim_end_matches(".png")
    }

    /// Accepts the file stem or the full file name.
    pub fn from_name(name: &str) -> Option<Chart> {
        Chart::ALL
            .into_iter()
            .find(|c| c.name() == name || c.file_name() == name)
    }
}

/// The read-only tables every chart draws from.
#[derive(Debug, Clone, Copy)]
pub struct ChartInputs<'a> {
    pub models: &'a [ModelRow],
    pub tests: &'a [TestRow],
    pub metrics: &'a MetricsTable,
}

/// Renders one chart into `out_dir`, overwriting any previous file.
pub fn render_chart(
    chart: Chart,
    inputs: ChartInputs<'_>,
    out_dir: &Path,
    settings: &ChartSettings,
) -> anyhow::Result<PathBuf> {
    let path = out_dir.join(chart.file_name());
    match chart {
        Chart::Hexbin => hexbin::draw(&path, inputs.models, settings),
        Chart::SchemaHeatmap => heatmap::draw(&path, inputs.models),
        Chart::StatusPie => pie::draw(&path, inputs.tests),
        Chart::ExecutionScatter => scatter::draw(&path, inputs.tests),
        Chart::ExecutionKde => kde::draw(&path, inputs.tests, settings),
        Chart::ExecutionViolin => violin::draw(&path, inputs.tests, settings),
        Chart::ModelPairPlot => pair::draw(&path, inputs.models, settings),
        Chart::ResourceTypes => bar::draw(&path, inputs.models),
        Chart::LengthBoxplot => boxplot::draw(&path, inputs.models),
        Chart::MetricsTable => table::draw(&path, inputs.metrics),
    }
    .with_context(|| format!("failed to render {}", chart.file_name()))?;

    tracing::info!(
        event = "runlens.chart.written",
        chart = chart.name(),
        path = %path.display(),
    );
    Ok(path)
}

#[derive(Debug, Default)]
pub struct RenderOutcome {
    pub written: Vec<PathBuf>,
    /// Charts skipped under [`ChartErrorPolicy::Continue`], with the error.
    pub failed: Vec<(Chart, String)>,
}

impl RenderOutcome {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Renders `charts` in order. Under [`ChartErrorPolicy::Abort`] the first
/// failure is returned and the remaining charts are not attempted.
pub fn render_charts(
    charts: &[Chart],
    inputs: ChartInputs<'_>,
    out_dir: &Path,
    settings: &ChartSettings,
    policy: ChartErrorPolicy,
) -> anyhow::Result<RenderOutcome> {
    let mut outcome = RenderOutcome::default();
    for &chart in charts {
        match render_chart(chart, inputs, out_dir, settings) {
            Ok(path) => outcome.written.push(path),
            Err(e) if policy.aborts() => return Err(e),
            Err(e) => {
                log_chart_failure(chart.name(), &e);
                outcome.failed.push((chart, format!("{:#}", e)));
            }
        }
    }
    Ok(outcome)
}
