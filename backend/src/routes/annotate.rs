use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use crate::error::ApiError;
use crate::models::annotate::{AnnotateRequest, Annotations};
use crate::AppState;

/// POST /model - annotate a batch of texts with named entities.
async fn annotate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnnotateRequest>,
) -> Result<Json<Annotations>, ApiError> {
    let model = state.model.read().await;
    let annotations = model.annotate(&request.x).await?;
    Ok(Json(annotations))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/model", post(annotate))
        .with_state(state)
}
