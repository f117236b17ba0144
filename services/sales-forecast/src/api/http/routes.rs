//! API 路由

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use salescast_cqrs_core::QueryHandler;
use salescast_errors::AppResult;
use salescast_telemetry::record_forecast_request;

use super::dto::ForecastResponse;
use crate::application::queries::{ForecastQuery, ForecastQueryHandler};
use crate::application::ForecastContext;

pub const ROOT_MESSAGE: &str =
    "Sales Forecasting API. Use /predict?days=N to get future predictions.";

#[derive(Clone)]
struct ApiState {
    forecast_handler: Arc<ForecastQueryHandler>,
}

pub fn forecast_routes(context: Arc<ForecastContext>) -> Router {
    let state = ApiState {
        forecast_handler: Arc::new(ForecastQueryHandler::new(context)),
    };

    Router::new()
        .route("/", get(root))
        .route("/predict", get(predict))
        .with_state(state)
}

async fn root() -> &'static str {
    ROOT_MESSAGE
}

/// GET /predict?days=N
///
/// 查询参数按出现顺序解析，重复的 `days` 取第一个
async fn predict(
    State(state): State<ApiState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<ForecastResponse>> {
    let started = Instant::now();

    let days = params
        .into_iter()
        .find(|(key, _)| key == "days")
        .map(|(_, value)| value);

    let result = state.forecast_handler.handle(ForecastQuery { days }).await;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    match &result {
        Ok(forecast) => {
            record_forecast_request(200, "ok", Some(forecast.horizon.days()), elapsed_ms)
        }
        Err(e) => record_forecast_request(e.status_code(), e.kind(), None, elapsed_ms),
    }

    result.map(|forecast| Json(ForecastResponse::from(forecast.points)))
}
