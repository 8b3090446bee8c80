use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `manifest.json` as written by the build tool. Only `nodes` is consumed;
/// every other top-level section is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Keyed by node id, in document order.
    pub nodes: IndexMap<String, ManifestNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestNode {
    pub resource_type: String,
    pub config: NodeConfig,
    #[serde(default)]
    pub schema: Option<String>,
    pub unique_id: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeConfig {
    #[serde(default)]
    pub materialized: Option<String>,
}

/// `run_results.json`. Only `results` is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct RunResults {
    pub results: Vec<RunResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunResult {
    pub unique_id: String,
    pub status: TestStatus,
    #[serde(default)]
    pub execution_time: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Status of an executed node. Values the build tool may add later are kept
/// verbatim in `Other` so charts group them like any other status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TestStatus {
    Pass,
    Fail,
    Warn,
    Error,
    Skipped,
    Success,
    Other(String),
}

impl TestStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "pass" => TestStatus::Pass,
            "fail" => TestStatus::Fail,
            "warn" => TestStatus::Warn,
            "error" => TestStatus::Error,
            "skipped" => TestStatus::Skipped,
            "success" => TestStatus::Success,
            other => TestStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TestStatus::Pass => "pass",
            TestStatus::Fail => "fail",
            TestStatus::Warn => "warn",
            TestStatus::Error => "error",
            TestStatus::Skipped => "skipped",
            TestStatus::Success => "success",
            TestStatus::Other(s) => s,
        }
    }
}

impl From<String> for TestStatus {
    fn from(s: String) -> Self {
        TestStatus::parse(&s)
    }
}

impl From<TestStatus> for String {
    fn from(s: TestStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One manifest node, flattened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRow {
    pub model_id: String,
    pub resource_type: String,
    pub materialized: String,
    pub schema: String,
    /// Character count of the node's `unique_id`.
    pub unique_id_length: usize,
    /// Character count of the node's `path`.
    pub file_path_length: usize,
}

/// One retained test result, flattened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestRow {
    pub unique_id: String,
    pub status: TestStatus,
    /// `None` when the run results carried no timing for this test.
    pub execution_time: Option<f64>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_keeps_unknown_values() {
        assert_eq!(TestStatus::parse("pass"), TestStatus::Pass);
        assert_eq!(TestStatus::parse("error"), TestStatus::Error);

        let odd = TestStatus::parse("runtime error");
        assert_eq!(odd, TestStatus::Other("runtime error".into()));
        assert_eq!(odd.as_str(), "runtime error");
    }

    #[test]
    fn test_status_is_case_sensitive() {
        assert_eq!(TestStatus::parse("PASS"), TestStatus::Other("PASS".into()));
    }

    #[test]
    fn test_run_result_optional_fields() {
        let r: RunResult = serde_json::from_str(
            r#"{"unique_id": "test.a", "status": "fail", "execution_time": null}"#,
        )
        .unwrap();
        assert_eq!(r.status, TestStatus::Fail);
        assert!(r.execution_time.is_none());
        assert!(r.message.is_none());
    }

    #[test]
    fn test_manifest_preserves_node_order() {
        let m: Manifest = serde_json::from_str(
            r#"{"nodes": {
                "model.z": {"resource_type": "model", "config": {}, "unique_id": "model.z", "path": "z.sql"},
                "model.a": {"resource_type": "model", "config": {}, "unique_id": "model.a", "path": "a.sql"}
            }}"#,
        )
        .unwrap();
        let keys: Vec<_> = m.nodes.keys().cloned().collect();
        assert_eq!(keys, vec!["model.z", "model.a"]);
    }
}
