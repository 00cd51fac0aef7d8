//! NER toolkit model configuration.
//!
//! The configuration is a JSON document owned by the worker's toolkit. Only
//! the sections the gateway rewrites are typed; every other key is preserved
//! through `#[serde(flatten)]` so the document reaches the worker untouched.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Dataset reader section of the toolkit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReader {
    pub class_name: String,
    pub data_path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "MODEL_PATH")]
    pub model_path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_reader: Option<DatasetReader>,
    pub metadata: Metadata,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum ModelConfigError {
    #[error("failed to read model config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse model config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

impl ModelConfig {
    /// Load the model configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ModelConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ModelConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&raw).map_err(|e| ModelConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// A copy of this configuration with its dataset reader pointed at the
    /// given rewritten dataset file.
    pub fn with_dataset(&self, data_path: &Path) -> Self {
        let mut config = self.clone();
        config.dataset_reader = Some(DatasetReader {
            class_name: "sq_reader".to_string(),
            data_path: data_path.display().to_string(),
            extra: Map::new(),
        });
        config
    }

    /// A copy of this configuration with `_new` appended to the model path,
    /// so training writes its output next to the pretrained weights instead
    /// of over them.
    pub fn with_new_model_path(&self) -> Self {
        let mut config = self.clone();
        config.metadata.model_path = format!("{}_new", self.metadata.model_path);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ModelConfig {
        serde_json::from_value(json!({
            "chainer": {"in": ["x"], "pipe": []},
            "dataset_reader": {
                "class_name": "conll_reader",
                "data_path": "data/conll.json",
                "shuffle": true
            },
            "metadata": {
                "MODEL_PATH": "models/ner_rus",
                "variables": {"ROOT_PATH": "~/.toolkit"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn unknown_keys_round_trip() {
        let config = sample();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["chainer"]["in"][0], "x");
        assert_eq!(json["dataset_reader"]["shuffle"], true);
        assert_eq!(json["metadata"]["variables"]["ROOT_PATH"], "~/.toolkit");
        assert_eq!(json["metadata"]["MODEL_PATH"], "models/ner_rus");
    }

    #[test]
    fn with_dataset_replaces_reader_and_keeps_base_intact() {
        let base = sample();
        let derived = base.with_dataset(Path::new("data/conll_train.json"));

        let reader = derived.dataset_reader.unwrap();
        assert_eq!(reader.class_name, "sq_reader");
        assert_eq!(reader.data_path, "data/conll_train.json");

        assert_eq!(
            base.dataset_reader.unwrap().class_name,
            "conll_reader"
        );
    }

    #[test]
    fn with_new_model_path_does_not_accumulate() {
        let base = sample();
        let first = base.with_new_model_path();
        let second = base.with_new_model_path();
        assert_eq!(first.metadata.model_path, "models/ner_rus_new");
        assert_eq!(second.metadata.model_path, "models/ner_rus_new");
        assert_eq!(base.metadata.model_path, "models/ner_rus");
    }

    #[test]
    fn config_without_dataset_reader_parses() {
        let config: ModelConfig = serde_json::from_value(json!({
            "metadata": {"MODEL_PATH": "models/ner"}
        }))
        .unwrap();
        assert!(config.dataset_reader.is_none());

        // And the absent reader stays absent on the wire.
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("dataset_reader").is_none());
    }
}
