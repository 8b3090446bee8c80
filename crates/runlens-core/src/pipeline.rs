//! The one driver: load, project, measure, render.

use anyhow::Context;
use std::path::PathBuf;

use crate::config::{ChartSettings, ReportConfig};
use crate::ingest::{load_artifacts, Artifacts, DEFAULT_TARGET_DIR};
use crate::metrics::{MetricsTable, QualityMetrics};
use crate::model::{ModelRow, TestRow};
use crate::on_error::ChartErrorPolicy;
use crate::project::{project_models, project_tests};
use crate::render::{render_charts, Chart, ChartInputs, RenderOutcome};

/// The projected tables plus the metrics derived from them.
#[derive(Debug, Clone)]
pub struct Tables {
    pub models: Vec<ModelRow>,
    pub tests: Vec<TestRow>,
    pub metrics: QualityMetrics,
}

impl Tables {
    pub fn from_artifacts(artifacts: &Artifacts) -> Self {
        let models = project_models(&artifacts.manifest);
        let tests = project_tests(&artifacts.run_results);
        let metrics = QualityMetrics::compute(&tests);
        Self {
            models,
            tests,
            metrics,
        }
    }

    /// Loads both artifacts from `target_dir` and projects them.
    pub fn load(target_dir: &std::path::Path) -> anyhow::Result<Self> {
        let artifacts = load_artifacts(target_dir)
            .with_context(|| format!("failed to load artifacts from {}", target_dir.display()))?;
        Ok(Self::from_artifacts(&artifacts))
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub target_dir: PathBuf,
    pub out_dir: PathBuf,
    pub settings: ChartSettings,
    pub on_chart_error: ChartErrorPolicy,
    /// Charts to render, in order.
    pub charts: Vec<Chart>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            out_dir: PathBuf::from("."),
            settings: ChartSettings::default(),
            on_chart_error: ChartErrorPolicy::default(),
            charts: Chart::ALL.to_vec(),
        }
    }
}

impl PipelineOptions {
    /// Options taken from a config file; unset directories keep their defaults.
    pub fn from_config(cfg: &ReportConfig) -> Self {
        let defaults = Self::default();
        Self {
            target_dir: cfg.target_dir.clone().unwrap_or(defaults.target_dir),
            out_dir: cfg.out_dir.clone().unwrap_or(defaults.out_dir),
            settings: cfg.charts.clone(),
            on_chart_error: cfg.on_chart_error,
            charts: defaults.charts,
        }
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub total_models: usize,
    pub total_tests: usize,
    pub metrics: MetricsTable,
    pub charts: RenderOutcome,
}

/// Runs the whole pipeline. Ingestion failures return before anything is
/// written; chart failures follow `opts.on_chart_error`.
pub fn run(opts: &PipelineOptions) -> anyhow::Result<RunSummary> {
    let tables = Tables::load(&opts.target_dir)?;
    let metrics = tables.metrics.table();

    std::fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("failed to create output dir {}", opts.out_dir.display()))?;

    let inputs = ChartInputs {
        models: &tables.models,
        tests: &tables.tests,
        metrics: &metrics,
    };
    let charts = render_charts(
        &opts.charts,
        inputs,
        &opts.out_dir,
        &opts.settings,
        opts.on_chart_error,
    )?;

    tracing::info!(
        event = "runlens.render.done",
        models = tables.models.len(),
        tests = tables.tests.len(),
        written = charts.written.len(),
        failed = charts.failed.len(),
        out_dir = %opts.out_dir.display(),
        "rendered {} of {} charts",
        charts.written.len(),
        opts.charts.len()
    );

    Ok(RunSummary {
        total_models: tables.models.len(),
        total_tests: tables.tests.len(),
        metrics,
        charts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_target_dir_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let opts = PipelineOptions {
            target_dir: dir.path().join("target"),
            out_dir: dir.path().join("out"),
            ..Default::default()
        };

        let err = run(&opts).unwrap_err();
        assert!(format!("{:#}", err).contains("manifest.json"));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_options_from_config() {
        let cfg = ReportConfig {
            out_dir: Some(PathBuf::from("reports")),
            on_chart_error: ChartErrorPolicy::Continue,
            ..Default::default()
        };
        let opts = PipelineOptions::from_config(&cfg);
        assert_eq!(opts.target_dir, PathBuf::from("target"));
        assert_eq!(opts.out_dir, PathBuf::from("reports"));
        assert_eq!(opts.on_chart_error, ChartErrorPolicy::Continue);
        assert_eq!(opts.charts.len(), 10);
    }
}
