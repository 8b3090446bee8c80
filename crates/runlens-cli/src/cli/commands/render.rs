use super::exit_codes;
use crate::cli::args::RenderArgs;
use anyhow::Result;
use runlens_core::pipeline::{run as run_pipeline, PipelineOptions};
use runlens_core::render::Chart;

pub fn run(args: RenderArgs) -> Result<i32> {
    let cfg = super::resolve_config(args.config.as_deref(), args.strict)?;

    let mut opts = PipelineOptions::from_config(&cfg);
    if let Some(dir) = args.target_dir {
        opts.target_dir = dir;
    }
    if let Some(dir) = args.out_dir {
        opts.out_dir = dir;
    }
    if let Some(policy) = args.on_chart_error {
        opts.on_chart_error = policy;
    }
    if !args.only.is_empty() {
        match select_charts(&args.only) {
            Ok(charts) => opts.charts = charts,
            Err(name) => {
                eprintln!(
                    "config error: unknown chart '{}' (see `runlens charts`)",
                    name
                );
                return Ok(exit_codes::CONFIG_ERROR);
            }
        }
    }

    let summary = run_pipeline(&opts)?;

    for (chart, error) in &summary.charts.failed {
        eprintln!("chart failed: {}: {}", chart.file_name(), error);
    }
    if summary.charts.is_clean() {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::CHARTS_FAILED)
    }
}

/// Charts in render order; the offending name on a miss.
fn select_charts(names: &[String]) -> Result<Vec<Chart>, String> {
    let wanted = names
        .iter()
        .map(|n| Chart::from_name(n).ok_or_else(|| n.clone()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Chart::ALL
        .into_iter()
        .filter(|c| wanted.contains(c))
        .collect())
}
