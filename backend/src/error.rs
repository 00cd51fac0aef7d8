use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::dataset::DatasetError;
use crate::worker::WorkerError;

/// Errors surfaced to HTTP callers as `{"error": "..."}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Worker(#[from] WorkerError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            // Bad input file vs. internal fault.
            ApiError::Dataset(e) => match e {
                DatasetError::NotFound(_)
                | DatasetError::InvalidJson { .. }
                | DatasetError::NotAnArray(_) => StatusCode::BAD_REQUEST,
                DatasetError::Read { .. } | DatasetError::Write { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Worker(e) => match e {
                WorkerError::Unreachable(_) => StatusCode::BAD_GATEWAY,
                WorkerError::RequestFailed(_)
                | WorkerError::InvalidResponse(_)
                | WorkerError::WorkerFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = %status.as_u16(), "Request failed: {}", self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dataset_is_bad_request() {
        let err = ApiError::from(DatasetError::NotFound("data.json".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn dataset_write_failure_is_internal() {
        let err = ApiError::from(DatasetError::Write {
            path: "out.json".to_string(),
            source: std::io::Error::other("disk full"),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unreachable_worker_is_bad_gateway() {
        let err = ApiError::from(WorkerError::Unreachable("refused".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn worker_fault_is_internal() {
        let err = ApiError::from(WorkerError::WorkerFault("500: boom".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
