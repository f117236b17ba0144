//! 已拟合模型
//!
//! 模型由外部训练流程拟合并序列化为 JSON，字段 `model` 标识模型类型：
//!
//! ```json
//! {"model": "arima", "order": [1, 1, 0], "ar": [0.42], "constant": 0.8, "history": [512.3, 520.1]}
//! {"model": "holt", "level": 1032.5, "trend": 4.1, "damping": 0.98}
//! ```

mod arima;
mod holt;

pub use arima::ArimaModel;
pub use holt::HoltModel;

use std::sync::Arc;

use salescast_ports::{Forecastable, ModelError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 模型文件校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {model} artifact: {reason}")]
pub struct ArtifactError {
    pub model: &'static str,
    pub reason: String,
}

impl ArtifactError {
    pub(crate) fn new(model: &'static str, reason: impl Into<String>) -> Self {
        Self {
            model,
            reason: reason.into(),
        }
    }
}

/// 序列化的模型文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ModelArtifact {
    Arima(ArimaModel),
    Holt(HoltModel),
}

impl ModelArtifact {
    /// 解析 JSON 模型文件
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// 校验结构并转换为可预测模型
    pub fn into_forecastable(self) -> Result<Arc<dyn Forecastable>, ArtifactError> {
        match self {
            Self::Arima(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
            Self::Holt(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
        }
    }
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// 为 `steps` 个预测值预留空间，分配失败时返回错误而不是中止进程
fn reserve_steps(buf: &mut Vec<f64>, steps: usize) -> Result<(), ModelError> {
    buf.try_reserve_exact(steps)
        .map_err(|e| ModelError::Failed(format!("cannot allocate {steps} forecast steps: {e}")))
}
