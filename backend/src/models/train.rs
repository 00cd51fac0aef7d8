use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Request body for the training endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainRequest {
    /// Path to a JSON file containing a flat list of labeled examples.
    pub train_filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainResponse {
    pub trained: bool,
}

/// Request body for the evaluation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// Path to a JSON file containing a flat list of test examples.
    pub test_filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    /// Metric name to value, as reported by the worker for the test split.
    pub metrics: HashMap<String, f64>,
}
