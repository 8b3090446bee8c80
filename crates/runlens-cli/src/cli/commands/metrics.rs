use super::exit_codes;
use crate::cli::args::MetricsArgs;
use anyhow::Result;
use runlens_core::pipeline::{PipelineOptions, Tables};
use runlens_core::report::{format_report, MetricsReport};

pub fn run(args: MetricsArgs) -> Result<i32> {
    let cfg = super::resolve_config(args.config.as_deref(), false)?;
    let target_dir = args
        .target_dir
        .unwrap_or_else(|| PipelineOptions::from_config(&cfg).target_dir);

    let tables = Tables::load(&target_dir)?;
    let report = MetricsReport::new(&tables);
    print!("{}", format_report(&report, args.format)?);
    Ok(exit_codes::OK)
}
