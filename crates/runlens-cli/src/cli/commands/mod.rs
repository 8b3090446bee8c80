use super::args::*;
use anyhow::Context;
use runlens_core::config::{load_config, ReportConfig, DEFAULT_CONFIG_FILE};
use std::path::{Path, PathBuf};

pub mod metrics;
pub mod render;

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const CHARTS_FAILED: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
    pub const FATAL: i32 = 2;
}

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Render(args) => render::run(args),
        Command::Metrics(args) => metrics::run(args),
        Command::Charts => {
            list_charts();
            Ok(exit_codes::OK)
        }
        Command::Init(args) => cmd_init(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

fn list_charts() {
    for chart in runlens_core::render::Chart::ALL {
        println!("{:<36} {}", chart.file_name(), chart.title());
    }
}

fn cmd_init(args: InitArgs) -> anyhow::Result<i32> {
    if args.config.exists() {
        eprintln!("note: {} already exists", args.config.display());
        return Ok(exit_codes::OK);
    }
    if let Some(parent) = args.config.parent() {
        std::fs::create_dir_all(parent)?;
    }
    runlens_core::config::write_sample_config(&args.config)?;
    eprintln!("created {}", args.config.display());
    Ok(exit_codes::OK)
}

/// Explicit `--config` must exist; otherwise `./runlens.yaml` is used when
/// present and defaults apply when it is not.
pub(crate) fn resolve_config(explicit: Option<&Path>, strict: bool) -> anyhow::Result<ReportConfig> {
    let path: PathBuf = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(ReportConfig::default());
            }
            default
        }
    };
    let cfg = load_config(&path, strict)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    tracing::debug!(event = "runlens.config.loaded", file = %path.display());
    Ok(cfg)
}
