//! 只读查询
//!
//! 查询不修改服务状态，处理器可以被并发调用。

use async_trait::async_trait;
use salescast_errors::AppResult;

/// 查询
pub trait Query: Send + Sync + 'static {
    /// 查询名称，用于日志和指标标签
    const NAME: &'static str;

    type Result: Send;
}

/// 查询处理器
///
/// 失败统一返回 `AppError`，由 HTTP 层映射状态码
#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    async fn handle(&self, query: Q) -> AppResult<Q::Result>;
}
