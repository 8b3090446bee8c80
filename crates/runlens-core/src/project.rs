//! Flattening of the parsed artifacts into the two row tables.

use crate::model::{Manifest, ModelRow, RunResults, TestRow};

/// Results whose id contains this marker are treated as tests.
pub const TEST_ID_MARKER: &str = "test";

/// Placeholder for a missing materialization or schema.
pub const UNKNOWN: &str = "unknown";

/// One row per manifest node, in manifest order.
pub fn project_models(manifest: &Manifest) -> Vec<ModelRow> {
    manifest
        .nodes
        .iter()
        .map(|(model_id, node)| ModelRow {
            model_id: model_id.clone(),
            resource_type: node.resource_type.clone(),
            materialized: node
                .config
                .materialized
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            schema: node.schema.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            unique_id_length: node.unique_id.chars().count(),
            file_path_length: node.path.chars().count(),
        })
        .collect()
}

/// One row per result whose id contains [`TEST_ID_MARKER`], in result order.
pub fn project_tests(run_results: &RunResults) -> Vec<TestRow> {
    run_results
        .results
        .iter()
        .filter(|r| is_test_result(&r.unique_id))
        .map(|r| TestRow {
            unique_id: r.unique_id.clone(),
            status: r.status.clone(),
            execution_time: r.execution_time,
            message: r.message.clone().unwrap_or_default(),
        })
        .collect()
}

/// Plain case-sensitive substring match; `"TEST.c"` is not a test.
pub fn is_test_result(unique_id: &str) -> bool {
    unique_id.contains(TEST_ID_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ManifestNode, NodeConfig, RunResult, TestStatus};
    use indexmap::IndexMap;

    fn node(unique_id: &str, path: &str) -> ManifestNode {
        ManifestNode {
            resource_type: "model".into(),
            config: NodeConfig::default(),
            schema: None,
            unique_id: unique_id.into(),
            path: path.into(),
        }
    }

    fn result(id: &str, status: &str, time: Option<f64>) -> RunResult {
        RunResult {
            unique_id: id.into(),
            status: TestStatus::parse(status),
            execution_time: time,
            message: None,
        }
    }

    #[test]
    fn test_model_rows_match_nodes() {
        let mut nodes = IndexMap::new();
        nodes.insert("model.shop.orders".to_string(), node("model.shop.orders", "orders.sql"));
        let mut seeded = node("seed.shop.países", "seeds/países.csv");
        seeded.resource_type = "seed".into();
        seeded.schema = Some("raw".into());
        seeded.config.materialized = Some("seed".into());
        nodes.insert("seed.shop.países".to_string(), seeded);

        let rows = project_models(&Manifest { nodes });

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].model_id, "model.shop.orders");
        assert_eq!(rows[0].materialized, UNKNOWN);
        assert_eq!(rows[0].schema, UNKNOWN);
        assert_eq!(rows[0].unique_id_length, 17);
        assert_eq!(rows[0].file_path_length, 10);

        // Character counts, not byte lengths.
        assert_eq!(rows[1].unique_id_length, 16);
        assert_eq!(rows[1].file_path_length, 16);
        assert_eq!(rows[1].schema, "raw");
        assert_eq!(rows[1].materialized, "seed");
    }

    #[test]
    fn test_filter_is_case_sensitive_substring() {
        let rr = RunResults {
            results: vec![
                result("model.a", "success", Some(1.0)),
                result("test.a.b", "pass", Some(0.5)),
                result("TEST.c", "pass", Some(0.5)),
            ],
        };

        let rows = project_tests(&rr);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unique_id, "test.a.b");
    }

    #[test]
    fn test_marker_anywhere_in_id() {
        assert!(is_test_result("model.contest_entries"));
        assert!(!is_test_result("model.orders"));
    }

    #[test]
    fn test_missing_message_defaults_to_empty() {
        let rows = project_tests(&RunResults {
            results: vec![result("test.x", "error", None)],
        });
        assert_eq!(rows[0].message, "");
        assert_eq!(rows[0].execution_time, None);
        assert_eq!(rows[0].status, TestStatus::Error);
    }
}
