//! Sales Forecast Service - 销售预测服务入口
//!
//! 使用 salescast-bootstrap 统一启动模式

use std::sync::Arc;

use sales_forecast::api::http::forecast_routes;
use sales_forecast::application::ForecastContext;
use salescast_bootstrap::{run_http, HttpService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载 .env（可选）
    dotenvy::dotenv().ok();

    run_http("config", |config| async move {
        // 模型和锚定日期只加载一次，失败时降级运行
        let context = Arc::new(ForecastContext::initialize(&config.forecast).await?);

        Ok(HttpService {
            router: forecast_routes(context.clone()),
            readiness: context,
        })
    })
    .await
}
