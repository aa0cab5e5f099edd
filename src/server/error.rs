//! Maps ledger failures onto HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::application::AppError;
use crate::domain::now_timestamp;

/// Body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
}

impl AppError {
    /// All domain failures share one status and differ only by message.
    pub fn status_code(&self) -> StatusCode {
        if self.is_domain() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if !self.is_domain() {
            error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            status: status.as_u16(),
            message: self.to_string(),
            time_stamp: now_timestamp(),
        };

        (status, Json(body)).into_response()
    }
}
