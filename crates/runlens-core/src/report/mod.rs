//! Text renditions of the metrics table, for when images are not wanted.

pub mod console;
pub mod json;

pub use json::MetricsReport;

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            other => Err(format!(
                "unknown format '{}' (expected: text, json, markdown)",
                other
            )),
        }
    }
}

/// Formats `report` as a string ready for stdout.
pub fn format_report(report: &MetricsReport, format: ReportFormat) -> anyhow::Result<String> {
    Ok(match format {
        ReportFormat::Text => console::format_table(&report.metrics),
        ReportFormat::Json => format!("{}\n", serde_json::to_string_pretty(report)?),
        ReportFormat::Markdown => report.metrics.to_markdown(),
    })
}
