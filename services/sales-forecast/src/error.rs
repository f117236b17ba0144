//! 服务错误定义

use chrono::NaiveDate;
use salescast_errors::AppError;
use salescast_ports::SourceError;
use thiserror::Error;

/// 模型文件加载错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("model artifact not found at '{path}'")]
    NotFound { path: String },

    #[error("failed to read model artifact '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    #[error("model artifact '{path}' is corrupt: {reason}")]
    Corrupt { path: String, reason: String },
}

/// 锚定日期推导错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnchorError {
    #[error("observation source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("required field '{0}' not found in observation source")]
    MissingField(String),

    #[error("malformed observation source: {0}")]
    Malformed(String),

    #[error("observation source contains no rows")]
    Empty,
}

impl From<SourceError> for AnchorError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unavailable(reason) => AnchorError::SourceUnavailable(reason),
            SourceError::MissingField(field) => AnchorError::MissingField(field),
            err @ SourceError::Malformed { .. } => AnchorError::Malformed(err.to_string()),
        }
    }
}

/// 预测天数校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid value for 'days'. Please provide an integer.")]
    NotAnInteger { raw: String },

    #[error("Number of days to forecast must be a positive integer.")]
    NotPositive { value: i64 },
}

/// 预测错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    #[error("Model or data not loaded. Check server logs for details.")]
    ResourcesUnavailable,

    #[error("An error occurred during prediction: {0}")]
    ModelFailure(String),

    #[error("An error occurred during prediction: forecast date {offset} days after {anchor} is out of range")]
    DateOutOfRange { anchor: NaiveDate, offset: u64 },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ForecastError> for AppError {
    fn from(err: ForecastError) -> Self {
        match err {
            ForecastError::ResourcesUnavailable => AppError::resources_unavailable(err.to_string()),
            ForecastError::ModelFailure(_) => AppError::model_failure(err.to_string()),
            ForecastError::DateOutOfRange { .. } => AppError::internal(err.to_string()),
        }
    }
}
