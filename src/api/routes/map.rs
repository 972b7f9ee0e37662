//! Map Routes
//!
//! - POST /api/v1/map - Raw CSV body in, map view description out

use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::data::UploadTable;
use crate::map::MapView;

/// POST /api/v1/map
pub async fn render_view(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<MapView>> {
    if body.is_empty() {
        return Err(ApiError::Validation("Empty request body".to_string()));
    }

    let upload = UploadTable::parse(&body)?;
    let view = state.renderer.run(&upload, state.boundaries.as_ref()).await?;

    Ok(Json(view))
}
