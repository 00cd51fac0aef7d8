//! Dataset file rewriting for the training and evaluation endpoints.
//!
//! Both endpoints take a path to a flat JSON array of labeled examples and
//! rewrite it next to the input as a `{"train": .., "valid": .., "test": ..}`
//! document in the layout the worker's dataset reader expects.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

/// Fraction of examples that go to the train partition.
pub const TRAIN_FRACTION: f64 = 0.9;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset file not found: {0}")]
    NotFound(String),
    #[error("failed to read dataset file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write dataset file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("dataset file {path} is not valid JSON: {source}")]
    InvalidJson {
        path: String,
        source: serde_json::Error,
    },
    #[error("dataset file {0} must contain a JSON array of examples")]
    NotAnArray(String),
}

#[derive(Debug, Serialize)]
struct SplitFile {
    train: Vec<Value>,
    valid: Vec<Value>,
    test: Vec<Value>,
}

/// Partition sizes of a written split file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSummary {
    pub train: usize,
    pub valid: usize,
    pub test: usize,
}

/// Read a dataset file and require a flat JSON array of examples.
pub fn load_examples(path: &Path) -> Result<Vec<Value>, DatasetError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DatasetError::NotFound(path.display().to_string())
        } else {
            DatasetError::Read {
                path: path.display().to_string(),
                source: e,
            }
        }
    })?;

    let value: Value = serde_json::from_str(&raw).map_err(|e| DatasetError::InvalidJson {
        path: path.display().to_string(),
        source: e,
    })?;

    match value {
        Value::Array(examples) => Ok(examples),
        _ => Err(DatasetError::NotAnArray(path.display().to_string())),
    }
}

/// Split the examples in `path` into train/valid/test partitions and write
/// them to `<stem>_train.json` next to the input.
///
/// The first `TRAIN_FRACTION` of the examples become the train partition;
/// the remaining tail is shared verbatim by `valid` and `test`, so every
/// example lands in exactly one of train or the tail.
pub fn write_train_split(path: &Path) -> Result<(PathBuf, SplitSummary), DatasetError> {
    let examples = load_examples(path)?;

    let boundary = (examples.len() as f64 * TRAIN_FRACTION) as usize;
    let tail = examples[boundary..].to_vec();
    let split = SplitFile {
        train: examples[..boundary].to_vec(),
        valid: tail.clone(),
        test: tail,
    };
    let summary = SplitSummary {
        train: split.train.len(),
        valid: split.valid.len(),
        test: split.test.len(),
    };

    let out_path = sibling_with_suffix(path, "train");
    write_split(&out_path, &split)?;
    Ok((out_path, summary))
}

/// Rewrite the examples in `path` as an evaluation-only dataset with empty
/// train and valid partitions, written to `<stem>_test.json` next to the
/// input. Returns the output path and the number of test examples.
pub fn write_test_split(path: &Path) -> Result<(PathBuf, usize), DatasetError> {
    let examples = load_examples(path)?;
    let count = examples.len();

    let split = SplitFile {
        train: Vec::new(),
        valid: Vec::new(),
        test: examples,
    };

    let out_path = sibling_with_suffix(path, "test");
    write_split(&out_path, &split)?;
    Ok((out_path, count))
}

fn write_split(path: &Path, split: &SplitFile) -> Result<(), DatasetError> {
    let body = serde_json::to_string_pretty(split).map_err(|e| DatasetError::InvalidJson {
        path: path.display().to_string(),
        source: e,
    })?;
    fs::write(path, body).map_err(|e| DatasetError::Write {
        path: path.display().to_string(),
        source: e,
    })
}

/// `<dir>/<stem>_<suffix>.json` for the given input path.
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}_{}.json", stem, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_examples(dir: &Path, name: &str, count: usize) -> PathBuf {
        let examples: Vec<Value> = (0..count).map(|i| json!({"id": i})).collect();
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string(&examples).unwrap()).unwrap();
        path
    }

    fn read_split(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn train_split_partitions_every_example() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_examples(dir.path(), "data.json", 10);

        let (out_path, summary) = write_train_split(&input).unwrap();
        assert_eq!(out_path, dir.path().join("data_train.json"));
        assert_eq!(summary.train, 9);
        assert_eq!(summary.valid, 1);
        assert_eq!(summary.test, 1);

        let split = read_split(&out_path);
        let train = split["train"].as_array().unwrap();
        let test = split["test"].as_array().unwrap();
        assert_eq!(split["valid"], split["test"]);

        // No example lost or duplicated across train and the shared tail.
        let mut ids: Vec<i64> = train
            .iter()
            .chain(test.iter())
            .map(|e| e["id"].as_i64().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn train_split_boundary_tracks_example_count() {
        let dir = tempfile::tempdir().unwrap();

        let small = write_examples(dir.path(), "small.json", 3);
        let (_, summary) = write_train_split(&small).unwrap();
        assert_eq!((summary.train, summary.test), (2, 1));

        let large = write_examples(dir.path(), "large.json", 100);
        let (_, summary) = write_train_split(&large).unwrap();
        assert_eq!((summary.train, summary.test), (90, 10));
    }

    #[test]
    fn train_split_of_empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_examples(dir.path(), "empty.json", 0);

        let (out_path, summary) = write_train_split(&input).unwrap();
        assert_eq!((summary.train, summary.valid, summary.test), (0, 0, 0));
        let split = read_split(&out_path);
        assert_eq!(split["train"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_split_keeps_all_examples_in_test() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_examples(dir.path(), "eval.json", 7);

        let (out_path, count) = write_test_split(&input).unwrap();
        assert_eq!(out_path, dir.path().join("eval_test.json"));
        assert_eq!(count, 7);

        let split = read_split(&out_path);
        assert_eq!(split["train"].as_array().unwrap().len(), 0);
        assert_eq!(split["valid"].as_array().unwrap().len(), 0);
        assert_eq!(split["test"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn stem_with_json_characters_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_examples(dir.path(), "json.json", 2);

        let (out_path, _) = write_test_split(&input).unwrap();
        assert_eq!(out_path, dir.path().join("json_test.json"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let result = load_examples(Path::new("/nonexistent/data.json"));
        assert!(matches!(result, Err(DatasetError::NotFound(_))));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json at all").unwrap();

        let result = load_examples(&path);
        assert!(matches!(result, Err(DatasetError::InvalidJson { .. })));
    }

    #[test]
    fn non_array_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("object.json");
        fs::write(&path, r#"{"examples": []}"#).unwrap();

        let result = load_examples(&path);
        assert!(matches!(result, Err(DatasetError::NotAnArray(_))));
    }
}
