//! salescast-errors - 统一错误处理
//!
//! 所有服务共用的错误类型，以及错误到 HTTP 状态码的固定映射表

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resources unavailable: {0}")]
    ResourcesUnavailable(String),

    #[error("Model failure: {0}")]
    ModelFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn resources_unavailable(msg: impl Into<String>) -> Self {
        Self::ResourcesUnavailable(msg.into())
    }

    pub fn model_failure(msg: impl Into<String>) -> Self {
        Self::ModelFailure(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::ResourcesUnavailable(_) => 500,
            Self::ModelFailure(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// 返回给调用方的消息（不带错误类别前缀）
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::ResourcesUnavailable(msg)
            | Self::ModelFailure(msg)
            | Self::Internal(msg) => msg,
        }
    }

    /// 错误类别，用于日志和 metrics 标签
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::ResourcesUnavailable(_) => "resources_unavailable",
            Self::ModelFailure(_) => "model_failure",
            Self::Internal(_) => "internal",
        }
    }

    /// 转换为错误响应体
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.message().to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_error_body())).into_response()
    }
}

/// 错误响应体: `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_status_code_table() {
        assert_eq!(AppError::validation("x").status_code(), 400);
        assert_eq!(AppError::resources_unavailable("x").status_code(), 500);
        assert_eq!(AppError::model_failure("x").status_code(), 500);
        assert_eq!(AppError::internal("x").status_code(), 500);
    }

    #[test]
    fn test_message_has_no_prefix() {
        let err = AppError::validation("Number of days to forecast must be a positive integer.");
        assert_eq!(
            err.message(),
            "Number of days to forecast must be a positive integer."
        );
        assert!(err.to_string().starts_with("Validation error: "));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(AppError::validation("x").kind(), "validation");
        assert_eq!(AppError::resources_unavailable("x").kind(), "resources_unavailable");
        assert_eq!(AppError::model_failure("x").kind(), "model_failure");
        assert_eq!(AppError::internal("x").kind(), "internal");
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = AppError::resources_unavailable("Model or data not loaded.").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "Model or data not loaded.");
    }
}
