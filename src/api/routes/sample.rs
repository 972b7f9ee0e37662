//! Sample Route
//!
//! - GET /sample.csv - Download the demonstration dataset

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::api::error::ApiResult;
use crate::data::{sample_csv, SAMPLE_FILE_NAME};

/// GET /sample.csv
pub async fn download_sample() -> ApiResult<Response> {
    let body = sample_csv()?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", SAMPLE_FILE_NAME),
            ),
        ],
        body,
    )
        .into_response())
}
