//! Page Routes
//!
//! The dashboard page itself.
//!
//! - GET / - Landing page with sample download and upload form
//! - POST /render - Upload a CSV (multipart field `file`) and render the map

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::data::UploadTable;
use crate::map::{html, FlowError};

/// Multipart field carrying the CSV
pub const UPLOAD_FIELD: &str = "file";

/// GET /
pub async fn index() -> Html<String> {
    Html(html::landing_page())
}

/// POST /render
///
/// Runs the whole flow for one upload. A boundary fetch failure is reported
/// on the page; every other failure goes to the JSON error response.
pub async fn render_upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let data = read_upload(&mut multipart).await?;
    let upload = UploadTable::parse(&data)?;

    tracing::info!(
        rows = upload.len(),
        metrics = upload.metric_columns.len(),
        "Received upload"
    );

    match state.renderer.run(&upload, state.boundaries.as_ref()).await {
        Ok(view) => Ok(Html(html::map_page(&view)?).into_response()),
        Err(FlowError::Boundaries(e)) => Ok((
            StatusCode::BAD_GATEWAY,
            Html(html::fetch_error_page(&upload, &e.to_string())),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

async fn read_upload(multipart: &mut Multipart) -> ApiResult<Bytes> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(format!("Failed to read upload: {}", e)));
        }
    }

    Err(ApiError::Validation(format!(
        "No file uploaded (expected form field '{}')",
        UPLOAD_FIELD
    )))
}
