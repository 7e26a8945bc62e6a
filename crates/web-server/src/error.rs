use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Validation error: {0}")]
    Validation(#[from] core_types::CoreError),
    #[error("Export error: {0}")]
    Export(#[from] exporter::ExportError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Missing or empty user identity header")]
    Unauthorized,
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Store(store_err) => match store_err {
                StoreError::ChartNotFound(_) | StoreError::DataPointNotFound(_) => {
                    (StatusCode::NOT_FOUND, store_err.to_string())
                }
                StoreError::LimitExceeded(_) => {
                    tracing::warn!(error = %store_err, "Quota reached.");
                    (StatusCode::CONFLICT, store_err.to_string())
                }
            },
            AppError::Validation(core_err) => {
                tracing::warn!(error = %core_err, "Rejected invalid input.");
                (StatusCode::BAD_REQUEST, core_err.to_string())
            }
            AppError::Export(export_err) => {
                tracing::error!(error = ?export_err, "Export error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while exporting the chart".to_string(),
                )
            }
            AppError::BadRequest(message) => {
                tracing::warn!(error = %message, "Rejected malformed request.");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Authentication required".to_string()),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
