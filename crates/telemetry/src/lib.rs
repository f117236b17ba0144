//! salescast-telemetry - 可观测性库

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化 tracing
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// 初始化 JSON 格式的 tracing（生产环境）
pub fn init_tracing_json(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

/// 初始化 Prometheus metrics
///
/// 全局 recorder 只能安装一次，重复调用返回错误
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// 记录一次预测请求
///
/// `outcome` 为 `ok` 或错误类别（`AppError::kind`）
pub fn record_forecast_request(
    status: u16,
    outcome: &'static str,
    horizon: Option<usize>,
    duration_ms: f64,
) {
    let labels = [("status", status.to_string()), ("outcome", outcome.to_string())];

    counter!("forecast_requests_total", &labels).increment(1);
    histogram!("forecast_request_duration_ms", &labels).record(duration_ms);

    if let Some(days) = horizon {
        histogram!("forecast_horizon_days").record(days as f64);
    }
}

/// 记录启动时资源加载结果（1 = 已加载, 0 = 缺失）
pub fn record_resource_loaded(resource: &'static str, loaded: bool) {
    gauge!("forecast_resource_loaded", "resource" => resource).set(if loaded { 1.0 } else { 0.0 });
}
