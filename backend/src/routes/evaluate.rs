use std::path::Path;
use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use crate::dataset;
use crate::error::ApiError;
use crate::models::train::{EvaluateRequest, EvaluateResponse};
use crate::AppState;

/// POST /test - evaluate the model on a labeled dataset file.
async fn evaluate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let (dataset_path, count) = dataset::write_test_split(Path::new(&request.test_filename))?;
    tracing::info!(
        examples = count,
        "Rewrote evaluation dataset to {}",
        dataset_path.display()
    );

    let mut model = state.model.write().await;
    let metrics = model.evaluate(&dataset_path).await?;

    Ok(Json(EvaluateResponse { metrics }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/test", post(evaluate))
        .with_state(state)
}
