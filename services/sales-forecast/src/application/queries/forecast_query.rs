//! 销售预测查询

use std::sync::Arc;

use async_trait::async_trait;
use salescast_cqrs_core::{Query, QueryHandler};
use salescast_errors::{AppError, AppResult};
use tracing::{debug, error, warn};

use crate::application::ForecastContext;
use crate::domain::value_objects::{ForecastHorizon, ForecastPoint};
use crate::error::ForecastError;

/// 销售预测查询
#[derive(Debug, Clone, Default)]
pub struct ForecastQuery {
    /// 原始 `days` 参数，未提供时使用默认天数
    pub days: Option<String>,
}

impl Query for ForecastQuery {
    const NAME: &'static str = "forecast";

    type Result = ForecastResult;
}

/// 销售预测结果
#[derive(Debug, Clone)]
pub struct ForecastResult {
    pub horizon: ForecastHorizon,
    pub points: Vec<ForecastPoint>,
}

/// 销售预测查询处理器
pub struct ForecastQueryHandler {
    context: Arc<ForecastContext>,
}

impl ForecastQueryHandler {
    pub fn new(context: Arc<ForecastContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl QueryHandler<ForecastQuery> for ForecastQueryHandler {
    async fn handle(&self, query: ForecastQuery) -> AppResult<ForecastResult> {
        // 资源缺失时无论 days 取值都直接失败
        let engine = self.context.engine();
        if !engine.is_ready() {
            warn!(query = ForecastQuery::NAME, days = ?query.days, "Forecast requested while resources are not loaded");
            return Err(ForecastError::ResourcesUnavailable.into());
        }

        let horizon = ForecastHorizon::parse(query.days.as_deref(), self.context.default_horizon())
            .map_err(|e| {
                debug!(query = ForecastQuery::NAME, days = ?query.days, error = %e, "Rejected forecast horizon");
                AppError::from(e)
            })?;

        // 模型调用是同步计算，放到阻塞线程池执行，模型 panic 也被隔离为 JoinError
        let outcome = tokio::task::spawn_blocking(move || engine.forecast(horizon))
            .await
            .unwrap_or_else(|e| Err(ForecastError::ModelFailure(e.to_string())));

        outcome
            .map(|points| ForecastResult { horizon, points })
            .map_err(|e| {
                error!(query = ForecastQuery::NAME, %horizon, error = %e, "Forecast failed");
                AppError::from(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use salescast_ports::{Forecastable, ModelError};

    use crate::error::{AnchorError, LoadError};

    struct LinearModel;

    impl Forecastable for LinearModel {
        fn forecast(&self, steps: usize) -> Result<Vec<f64>, ModelError> {
            Ok((1..=steps).map(|i| 100.0 + i as f64 / 3.0).collect())
        }

        fn kind(&self) -> &'static str {
            "linear"
        }
    }

    struct PanickingModel;

    impl Forecastable for PanickingModel {
        fn forecast(&self, _steps: usize) -> Result<Vec<f64>, ModelError> {
            panic!("model state poisoned")
        }

        fn kind(&self) -> &'static str {
            "panicking"
        }
    }

    fn handler(model: Result<Arc<dyn Forecastable>, LoadError>) -> ForecastQueryHandler {
        let context = ForecastContext::from_outcomes(
            model,
            Ok(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
            ForecastHorizon::new(7).unwrap(),
        );
        ForecastQueryHandler::new(Arc::new(context))
    }

    fn query(days: Option<&str>) -> ForecastQuery {
        ForecastQuery {
            days: days.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_default_horizon() {
        let result = handler(Ok(Arc::new(LinearModel)))
            .handle(query(None))
            .await
            .unwrap();
        assert_eq!(result.horizon.days(), 7);
        assert_eq!(result.points.len(), 7);
        assert_eq!(result.points[0].value, 100.33);
    }

    #[tokio::test]
    async fn test_invalid_days_is_validation_error() {
        let h = handler(Ok(Arc::new(LinearModel)));
        for days in ["0", "-1", "abc"] {
            let err = h.handle(query(Some(days))).await.err().unwrap();
            assert_eq!(err.status_code(), 400, "days={days}");
        }
    }

    #[tokio::test]
    async fn test_unloaded_model_is_resources_unavailable() {
        let h = handler(Err(LoadError::NotFound {
            path: "models/sales_model.json".into(),
        }));
        for days in [Some("5"), None, Some("0"), Some("abc")] {
            let err = h.handle(query(days)).await.err().unwrap();
            assert!(matches!(err, AppError::ResourcesUnavailable(_)), "days={days:?}");
        }
    }

    #[tokio::test]
    async fn test_unloaded_anchor_is_resources_unavailable() {
        let context = ForecastContext::from_outcomes(
            Ok(Arc::new(LinearModel)),
            Err(AnchorError::Empty),
            ForecastHorizon::new(7).unwrap(),
        );
        let err = ForecastQueryHandler::new(Arc::new(context))
            .handle(query(None))
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_model_panic_is_model_failure() {
        let err = handler(Ok(Arc::new(PanickingModel)))
            .handle(query(Some("3")))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::ModelFailure(_)));
        assert!(err.message().starts_with("An error occurred during prediction: "));
    }
}
