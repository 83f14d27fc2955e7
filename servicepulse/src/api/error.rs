//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::PulseError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// エラーメッセージ
    pub error: String,
    /// エラーコード
    pub code: String,
}

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub PulseError);

impl From<PulseError> for AppError {
    fn from(err: PulseError) -> Self {
        AppError(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(PulseError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(PulseError::Validation(format!(
            "Invalid query parameters: {}",
            rejection.body_text()
        )))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(PulseError::Validation(format!(
            "Invalid path parameter: {}",
            rejection.body_text()
        )))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            // 詳細はログのみに残し、クライアントには汎用メッセージを返す
            tracing::error!(error = %self.0, "Request failed");
        }

        let payload = ErrorResponse {
            error: self.0.external_message(),
            code: self.0.error_code().to_string(),
        };

        (status, Json(payload)).into_response()
    }
}
