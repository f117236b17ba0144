//! HTTP 响应体

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ForecastPoint;

/// 成功响应: `{"forecast": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub forecast: Vec<ForecastPointDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPointDto {
    /// YYYY-MM-DD
    pub date: String,
    pub sales_prediction: f64,
}

impl From<&ForecastPoint> for ForecastPointDto {
    fn from(point: &ForecastPoint) -> Self {
        Self {
            date: point.date.format("%Y-%m-%d").to_string(),
            sales_prediction: point.value,
        }
    }
}

impl From<Vec<ForecastPoint>> for ForecastResponse {
    fn from(points: Vec<ForecastPoint>) -> Self {
        Self {
            forecast: points.iter().map(ForecastPointDto::from).collect(),
        }
    }
}
