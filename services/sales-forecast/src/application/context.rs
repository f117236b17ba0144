//! 预测服务上下文
//!
//! 启动时构建一次，之后只读，通过 axum State 注入到请求处理层。
//!
//! 启动策略为 fail-open：模型或锚定日期加载失败不会终止进程，
//! 服务照常监听，所有 /predict 请求返回 500，直到重启后重新加载。

use std::sync::Arc;

use chrono::NaiveDate;
use salescast_bootstrap::{ComponentHealth, HealthStatus, ReadinessProbe};
use salescast_config::ForecastConfig;
use salescast_errors::{AppError, AppResult};
use salescast_ports::{Forecastable, ObservationSource};
use salescast_telemetry::record_resource_loaded;
use tracing::{error, info};

use crate::domain::services::{DataAnchor, ForecastEngine};
use crate::domain::value_objects::ForecastHorizon;
use crate::error::{AnchorError, LoadError};
use crate::infrastructure::{CsvObservationSource, ModelStore};

pub struct ForecastContext {
    engine: Arc<ForecastEngine>,
    default_horizon: ForecastHorizon,
    model_error: Option<String>,
    anchor_error: Option<String>,
}

impl ForecastContext {
    /// 加载模型文件并从配置的 CSV 数据源推导锚定日期
    pub async fn initialize(config: &ForecastConfig) -> AppResult<Self> {
        let source =
            CsvObservationSource::new(&config.dataset, &config.date_column, &config.value_column);
        Self::initialize_with(config, &source).await
    }

    pub async fn initialize_with(
        config: &ForecastConfig,
        source: &dyn ObservationSource,
    ) -> AppResult<Self> {
        // 配置错误仍然是致命的，只有资源加载失败才降级
        let default_horizon = ForecastHorizon::new(config.default_horizon as usize)
            .map_err(|_| AppError::internal("forecast.default_horizon must be at least 1"))?;

        let model = ModelStore::load(&config.model_path).await;
        match &model {
            Ok(model) => info!(path = %config.model_path, kind = model.kind(), "Model loaded"),
            Err(e) => error!(path = %config.model_path, error = %e, "Failed to load model"),
        }

        let anchor = DataAnchor::derive_from(source).await;
        match &anchor {
            Ok(date) => info!(location = source.location(), %date, "Last known date derived"),
            Err(e) => error!(location = source.location(), error = %e, "Failed to derive last known date"),
        }

        Ok(Self::from_outcomes(model, anchor, default_horizon))
    }

    pub fn from_outcomes(
        model: Result<Arc<dyn Forecastable>, LoadError>,
        anchor: Result<NaiveDate, AnchorError>,
        default_horizon: ForecastHorizon,
    ) -> Self {
        record_resource_loaded("model", model.is_ok());
        record_resource_loaded("anchor", anchor.is_ok());

        let (model, model_error) = match model {
            Ok(model) => (Some(model), None),
            Err(e) => (None, Some(e.to_string())),
        };
        let (anchor, anchor_error) = match anchor {
            Ok(date) => (Some(date), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            engine: Arc::new(ForecastEngine::new(model, anchor)),
            default_horizon,
            model_error,
            anchor_error,
        }
    }

    pub fn engine(&self) -> Arc<ForecastEngine> {
        self.engine.clone()
    }

    pub fn default_horizon(&self) -> ForecastHorizon {
        self.default_horizon
    }
}

impl ReadinessProbe for ForecastContext {
    fn readiness(&self) -> HealthStatus {
        let mut status = HealthStatus::healthy();

        status.add_check(match &self.model_error {
            None => ComponentHealth::healthy("model"),
            Some(e) => ComponentHealth::unhealthy("model", e.clone()),
        });
        status.add_check(match &self.anchor_error {
            None => ComponentHealth::healthy("anchor"),
            Some(e) => ComponentHealth::unhealthy("anchor", e.clone()),
        });

        status
    }
}
