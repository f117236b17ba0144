//! 历史观测数据源 trait 定义

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 历史观测值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// 数据源错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("observation source unavailable: {0}")]
    Unavailable(String),

    #[error("required field '{0}' not found")]
    MissingField(String),

    #[error("malformed observation at row {row}: {reason}")]
    Malformed { row: usize, reason: String },
}

/// 历史观测数据源
#[async_trait]
pub trait ObservationSource: Send + Sync {
    /// 读取全部观测值（不排序、不去重）
    async fn fetch(&self) -> Result<Vec<Observation>, SourceError>;

    /// 数据源位置（用于日志）
    fn location(&self) -> &str;
}
