//! Data-quality metrics over the test table.
//!
//! All percentages share the test count as denominator. With no tests every
//! percentage is `NaN` and the run carries on; a warning is logged.

use crate::model::{TestRow, TestStatus};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityMetrics {
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub tests_with_execution_time: usize,
    pub tests_with_timing: usize,
    pub accuracy_pct: f64,
    pub completeness_pct: f64,
    /// Same formula as `accuracy_pct`; reported under its own name.
    pub consistency_pct: f64,
    pub unknown_timelines_pct: f64,
}

impl QualityMetrics {
    pub fn compute(tests: &[TestRow]) -> Self {
        let total = tests.len();
        let passed = tests.iter().filter(|t| t.status == TestStatus::Pass).count();
        let failed = tests.iter().filter(|t| t.status == TestStatus::Error).count();
        let with_time = tests.iter().filter(|t| t.execution_time.is_some()).count();
        let with_timing = tests
            .iter()
            .filter(|t| t.execution_time.is_some_and(|s| s > 0.0))
            .count();

        if total == 0 {
            tracing::warn!(
                event = "runlens.metrics.empty",
                "no test results matched; percentage metrics are NaN"
            );
        }

        Self {
            total_tests: total,
            passed_tests: passed,
            failed_tests: failed,
            tests_with_execution_time: with_time,
            tests_with_timing: with_timing,
            accuracy_pct: percent(passed, total),
            completeness_pct: percent(with_timing, total),
            consistency_pct: percent(passed, total),
            unknown_timelines_pct: percent(total - with_timing, total),
        }
    }

    /// The metrics as named rows, in report order.
    pub fn table(&self) -> MetricsTable {
        use MetricValue::{Count, Percent};
        MetricsTable {
            rows: vec![
                MetricRow::new("Total Tests", Count(self.total_tests)),
                MetricRow::new("Passed Tests", Count(self.passed_tests)),
                MetricRow::new("Failed Tests", Count(self.failed_tests)),
                MetricRow::new(
                    "Tests with Execution Time",
                    Count(self.tests_with_execution_time),
                ),
                MetricRow::new("Tests with Timing", Count(self.tests_with_timing)),
                MetricRow::new("Accuracy (%)", Percent(self.accuracy_pct)),
                MetricRow::new("Completeness (%)", Percent(self.completeness_pct)),
                MetricRow::new("Consistency (%)", Percent(self.consistency_pct)),
                MetricRow::new(
                    "Unknown Timelines (%)",
                    Percent(self.unknown_timelines_pct),
                ),
            ],
        }
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return f64::NAN;
    }
    (part as f64 / total as f64) * 100.0
}

/// Two-column (name, value) view of [`QualityMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsTable {
    pub rows: Vec<MetricRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub name: &'static str,
    pub value: MetricValue,
}

impl MetricRow {
    fn new(name: &'static str, value: MetricValue) -> Self {
        Self { name, value }
    }
}

/// Counts print as integers, percentages with two decimals. `NaN`
/// serializes to JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(usize),
    Percent(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{}", n),
            MetricValue::Percent(p) if p.is_nan() => f.write_str("NaN"),
            MetricValue::Percent(p) => write!(f, "{:.2}", p),
        }
    }
}

impl MetricsTable {
    pub fn get(&self, name: &str) -> Option<MetricValue> {
        self.rows.iter().find(|r| r.name == name).map(|r| r.value)
    }

    pub fn to_markdown(&self) -> String {
        let mut md = String::from("| Metric | Value |\n|--------|-------|\n");
        for row in &self.rows {
            md.push_str(&format!("| {} | {} |\n", row.name, row.value));
        }
        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, time: Option<f64>) -> TestRow {
        TestRow {
            unique_id: format!("test.{}", status),
            status: TestStatus::parse(status),
            execution_time: time,
            message: String::new(),
        }
    }

    #[test]
    fn test_status_counts_and_accuracy() {
        let tests = vec![
            row("pass", Some(1.0)),
            row("pass", Some(1.0)),
            row("error", Some(1.0)),
        ];
        let m = QualityMetrics::compute(&tests);

        assert_eq!(m.total_tests, 3);
        assert_eq!(m.passed_tests, 2);
        assert_eq!(m.failed_tests, 1);
        assert!((m.accuracy_pct - 66.67).abs() < 0.01);
        assert_eq!(m.consistency_pct, m.accuracy_pct);
    }

    #[test]
    fn test_timing_counts() {
        let tests = vec![
            row("pass", Some(1.2)),
            row("pass", None),
            row("fail", Some(0.0)),
            row("pass", Some(3.4)),
        ];
        let m = QualityMetrics::compute(&tests);

        assert_eq!(m.tests_with_execution_time, 3);
        assert_eq!(m.tests_with_timing, 2);
        assert_eq!(m.completeness_pct, 50.0);
        assert_eq!(m.unknown_timelines_pct, 50.0);
        // "fail" is not "error"
        assert_eq!(m.failed_tests, 0);
    }

    #[test]
    fn test_empty_tests_yield_nan_percentages() {
        let m = QualityMetrics::compute(&[]);

        assert_eq!(m.total_tests, 0);
        assert_eq!(m.tests_with_timing, 0);
        assert!(m.accuracy_pct.is_nan());
        assert!(m.completeness_pct.is_nan());
        assert!(m.consistency_pct.is_nan());
        assert!(m.unknown_timelines_pct.is_nan());

        let table = m.table();
        assert_eq!(table.get("Accuracy (%)").unwrap().to_string(), "NaN");
        let json = serde_json::to_value(&table).unwrap();
        assert!(json["rows"][5]["value"].is_null());
    }

    #[test]
    fn test_table_keeps_both_accuracy_and_consistency() {
        let table = QualityMetrics::compute(&[row("pass", Some(1.0)), row("warn", None)]).table();

        let names: Vec<_> = table.rows.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), 9);
        assert!(names.contains(&"Accuracy (%)"));
        assert!(names.contains(&"Consistency (%)"));
        assert_eq!(table.get("Accuracy (%)"), table.get("Consistency (%)"));
        assert_eq!(table.get("Total Tests").unwrap().to_string(), "2");
        assert_eq!(table.get("Accuracy (%)").unwrap().to_string(), "50.00");
    }

    #[test]
    fn test_markdown_table() {
        let md = QualityMetrics::compute(&[row("pass", Some(2.0))]).table().to_markdown();
        assert!(md.starts_with("| Metric | Value |"));
        assert!(md.contains("| Completeness (%) | 100.00 |"));
    }
}
