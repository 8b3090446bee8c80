use chrono::Utc;
use serde::Serialize;

use crate::metrics::MetricsTable;
use crate::pipeline::Tables;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Machine-readable metrics output. Percentages that are `NaN` appear as
/// `null`.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub schema_version: u32,
    pub generated_at: String, // rfc3339
    pub total_models: usize,
    pub total_tests: usize,
    #[serde(serialize_with = "rows")]
    pub metrics: MetricsTable,
}

impl MetricsReport {
    pub fn new(tables: &Tables) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            total_models: tables.models.len(),
            total_tests: tables.tests.len(),
            metrics: tables.metrics.table(),
        }
    }
}

fn rows<S: serde::Serializer>(table: &MetricsTable, s: S) -> Result<S::Ok, S::Error> {
    table.rows.serialize(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::QualityMetrics;

    #[test]
    fn test_json_shape() {
        let tables = Tables {
            models: vec![],
            tests: vec![],
            metrics: QualityMetrics::compute(&[]),
        };
        let v = serde_json::to_value(MetricsReport::new(&tables)).unwrap();

        assert_eq!(v["schema_version"], 1);
        assert_eq!(v["total_tests"], 0);
        assert!(chrono::DateTime::parse_from_rfc3339(v["generated_at"].as_str().unwrap()).is_ok());
        assert_eq!(v["metrics"][0]["name"], "Total Tests");
        assert_eq!(v["metrics"][0]["value"], 0);
        assert!(v["metrics"][5]["value"].is_null());
        assert_eq!(v["metrics"].as_array().unwrap().len(), 9);
    }
}
