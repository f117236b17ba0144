//! Forecastable trait 定义

use thiserror::Error;

/// 模型调用错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("steps must be at least 1")]
    InvalidSteps,

    #[error("{0}")]
    Failed(String),
}

/// 已拟合的时间序列模型
///
/// 给定步数 `steps`，按时间顺序返回 `steps` 个未来值。
/// 对同一个内部状态，相同的 `steps` 必须返回相同结果。
/// 实现必须可以被多个请求并发调用。
pub trait Forecastable: Send + Sync {
    /// 预测未来 `steps` 期
    fn forecast(&self, steps: usize) -> Result<Vec<f64>, ModelError>;

    /// 模型类型名称（用于日志）
    fn kind(&self) -> &'static str;
}
