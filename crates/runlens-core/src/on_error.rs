// on_error.rs - what a render run does when one chart fails.
//
// Ingestion and metrics failures are always fatal; this policy only governs
// the independent chart steps that follow them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartErrorPolicy {
    /// Stop at the first failing chart; later charts are not rendered.
    #[default]
    Abort,

    /// Log the failure and render the remaining charts. The run still
    /// reports the failures so the caller can exit non-zero.
    Continue,
}

impl ChartErrorPolicy {
    pub fn aborts(&self) -> bool {
        matches!(self, ChartErrorPolicy::Abort)
    }
}

impl FromStr for ChartErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(ChartErrorPolicy::Abort),
            "continue" => Ok(ChartErrorPolicy::Continue),
            other => Err(format!(
                "unknown chart error policy '{}' (expected: abort, continue)",
                other
            )),
        }
    }
}

/// Structured record of a chart skipped under [`ChartErrorPolicy::Continue`].
pub fn log_chart_failure(chart: &str, error: &anyhow::Error) {
    tracing::warn!(
        event = "runlens.chart.failed",
        chart = %chart,
        error = %format!("{:#}", error),
        action = "continue",
        "Chart failed, continuing: {}", chart
    );
}
