use clap::{Parser, Subcommand, ValueEnum};
use runlens_core::on_error::ChartErrorPolicy;
use runlens_core::report::ReportFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "runlens",
    version,
    about = "Data-quality metrics and charts from dbt build artifacts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,

    /// Log filter directive, e.g. `info` or `runlens_core=debug`
    #[arg(long, global = true, env = "RUNLENS_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the chart images
    Render(RenderArgs),
    /// Print the metrics table without rendering
    Metrics(MetricsArgs),
    /// List the charts and their output files
    Charts,
    /// Write a sample runlens.yaml
    Init(InitArgs),
    /// Print the version
    Version,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Directory holding manifest.json and run_results.json
    #[arg(long, env = "RUNLENS_TARGET_DIR")]
    pub target_dir: Option<PathBuf>,

    /// Directory the images are written to
    #[arg(long, env = "RUNLENS_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// Config file (defaults to ./runlens.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fail on unknown config keys instead of warning
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// abort | continue
    #[arg(long)]
    pub on_chart_error: Option<ChartErrorPolicy>,

    /// Render only these charts (file stem, e.g. `hexbin_plot`); repeatable
    #[arg(long = "only", value_name = "NAME")]
    pub only: Vec<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct MetricsArgs {
    #[arg(long, env = "RUNLENS_TARGET_DIR")]
    pub target_dir: Option<PathBuf>,

    #[arg(long)]
    pub config: Option<PathBuf>,

    /// text | json | markdown
    #[arg(long, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(clap::Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(long, default_value = "runlens.yaml")]
    pub config: PathBuf,
}
