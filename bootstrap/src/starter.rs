//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use salescast_config::AppConfig;
use salescast_errors::AppResult;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::health::{health_routes, HealthChecker, ReadinessProbe};
use crate::metrics::{metrics_routes, MetricsRecorder};
use crate::runtime::{init_runtime, shutdown_signal};

/// 服务构建结果
pub struct HttpService {
    /// 业务路由（已绑定状态）
    pub router: Router,
    /// 就绪检查
    pub readiness: Arc<dyn ReadinessProbe>,
}

/// 运行 HTTP 服务
///
/// 所有服务的统一入口点。它负责：
/// 1. 加载配置
/// 2. 初始化运行时（日志）
/// 3. 安装 Prometheus recorder
/// 4. 调用用户提供的闭包构建业务路由
/// 5. 挂载 /health、/ready、/metrics
/// 6. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// use salescast_bootstrap::{run_http, HttpService};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_http("config", |config| async move {
///         let context = Arc::new(MyContext::initialize(&config).await);
///         Ok(HttpService { router: routes(context.clone()), readiness: context })
///     }).await
/// }
/// ```
pub async fn run_http<F, Fut>(
    config_dir: &str,
    service_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(AppConfig) -> Fut,
    Fut: Future<Output = AppResult<HttpService>>,
{
    // 1. 加载配置
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    // 3. 初始化 Metrics 记录器（必须早于服务构建，启动期的指标才能被记录）
    let mut app = Router::new();
    match MetricsRecorder::install() {
        Ok(recorder) => app = app.merge(metrics_routes(Arc::new(recorder))),
        Err(e) => warn!(error = %e, "Prometheus recorder not installed, /metrics disabled"),
    }

    // 4. 构建服务地址
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // 5. 构建业务服务
    let service = service_builder(config).await?;

    let app = app
        .merge(service.router)
        .merge(health_routes(HealthChecker::new(service.readiness)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!(%addr, "HTTP server starting");

    // 6. 启动服务器
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service stopped");

    Ok(())
}
