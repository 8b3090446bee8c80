use crate::errors::ConfigError;
use crate::on_error::ChartErrorPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_FILE: &str = "runlens.yaml";
pub const MAX_HEXBIN_GRIDSIZE: usize = 1000;
pub const MAX_KDE_GRID_POINTS: usize = 10_000;

/// Optional settings file. Every field has a default, so an absent file and
/// an empty file behave the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub on_chart_error: ChartErrorPolicy,
    #[serde(default)]
    pub charts: ChartSettings,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            target_dir: None,
            out_dir: None,
            on_chart_error: ChartErrorPolicy::default(),
            charts: ChartSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Hexagons across the x axis of the hexbin plot.
    #[serde(default = "default_hexbin_gridsize")]
    pub hexbin_gridsize: usize,
    /// Evaluation points per density curve.
    #[serde(default = "default_kde_grid_points")]
    pub kde_grid_points: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            hexbin_gridsize: default_hexbin_gridsize(),
            kde_grid_points: default_kde_grid_points(),
        }
    }
}

fn default_version() -> u32 {
    SUPPORTED_CONFIG_VERSION
}

fn default_hexbin_gridsize() -> usize {
    30
}

fn default_kde_grid_points() -> usize {
    200
}

pub fn load_config(path: &Path, strict: bool) -> Result<ReportConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;

    if raw.trim().is_empty() {
        return Ok(ReportConfig::default());
    }

    let mut ignored_keys = std::collections::BTreeSet::new();
    let deserializer = serde_yaml::Deserializer::from_str(&raw);
    let cfg: ReportConfig = serde_ignored::deserialize(deserializer, |path| {
        ignored_keys.insert(path.to_string());
    })
    .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;

    if !ignored_keys.is_empty() {
        if strict {
            return Err(ConfigError(format!(
                "Unknown fields detected in strict mode: {:?} (file: {})",
                ignored_keys,
                path.display()
            )));
        }
        tracing::warn!(
            event = "runlens.config.ignored_keys",
            keys = ?ignored_keys,
            file = %path.display(),
            "ignored unknown config fields"
        );
    }

    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError(format!(
            "unsupported config version {} (supported: {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }
    if !(1..=MAX_HEXBIN_GRIDSIZE).contains(&cfg.charts.hexbin_gridsize) {
        return Err(ConfigError(format!(
            "charts.hexbin_gridsize must be between 1 and {}, got {}",
            MAX_HEXBIN_GRIDSIZE, cfg.charts.hexbin_gridsize
        )));
    }
    if !(2..=MAX_KDE_GRID_POINTS).contains(&cfg.charts.kde_grid_points) {
        return Err(ConfigError(format!(
            "charts.kde_grid_points must be between 2 and {}, got {}",
            MAX_KDE_GRID_POINTS, cfg.charts.kde_grid_points
        )));
    }

    Ok(cfg)
}

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(
        path,
        r#"version: 1
# Directory holding manifest.json and run_results.json
target_dir: target
# Where the chart images are written
out_dir: .
# abort | continue
on_chart_error: abort
charts:
  hexbin_gridsize: 30
  kde_grid_points: 200
"#,
    )
    .map_err(|e| ConfigError(format!("failed to write sample config: {}", e)))?;
    Ok(())
}
