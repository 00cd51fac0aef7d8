use std::path::Path;
use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use crate::dataset;
use crate::error::ApiError;
use crate::models::train::{TrainRequest, TrainResponse};
use crate::AppState;

/// POST /train - retrain the model on a labeled dataset file.
async fn train(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TrainRequest>,
) -> Result<Json<TrainResponse>, ApiError> {
    let (dataset_path, summary) = dataset::write_train_split(Path::new(&request.train_filename))?;
    tracing::info!(
        train = summary.train,
        valid = summary.valid,
        test = summary.test,
        "Rewrote training dataset to {}",
        dataset_path.display()
    );

    let mut model = state.model.write().await;
    model.train(&dataset_path).await?;

    Ok(Json(TrainResponse { trained: true }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/train", post(train)).with_state(state)
}
