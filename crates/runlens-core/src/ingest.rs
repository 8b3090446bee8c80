use crate::errors::ArtifactError;
use crate::model::{Manifest, RunResults};
use serde::de::DeserializeOwned;
use std::path::Path;

pub const DEFAULT_TARGET_DIR: &str = "target";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const RUN_RESULTS_FILE: &str = "run_results.json";

/// Both build artifacts of one run, parsed.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub manifest: Manifest,
    pub run_results: RunResults,
}

/// Reads `manifest.json` and `run_results.json` from `target_dir`.
pub fn load_artifacts(target_dir: &Path) -> Result<Artifacts, ArtifactError> {
    let manifest = load_manifest(&target_dir.join(MANIFEST_FILE))?;
    let run_results = load_run_results(&target_dir.join(RUN_RESULTS_FILE))?;

    tracing::debug!(
        event = "runlens.ingest.loaded",
        target_dir = %target_dir.display(),
        nodes = manifest.nodes.len(),
        results = run_results.results.len(),
    );

    Ok(Artifacts {
        manifest,
        run_results,
    })
}

pub fn load_manifest(path: &Path) -> Result<Manifest, ArtifactError> {
    read_json(path)
}

pub fn load_run_results(path: &Path) -> Result<RunResults, ArtifactError> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_manifest(&dir.path().join(MANIFEST_FILE)).unwrap_err();

        assert!(matches!(err, ArtifactError::Read { .. }));
        assert!(err.to_string().contains("manifest.json"));
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RUN_RESULTS_FILE);
        std::fs::write(&path, r#"{"results": [{"unique_id": "test.a"}]}"#).unwrap();

        let err = load_run_results(&path).unwrap_err();
        assert!(err.to_string().contains("status"));
        match err {
            ArtifactError::Parse { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }
}
