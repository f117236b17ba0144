//! 预测点值对象

use chrono::NaiveDate;
use serde::Serialize;

/// 单日预测值
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// 保留两位小数
    pub value: f64,
}

impl ForecastPoint {
    pub fn new(date: NaiveDate, raw_value: f64) -> Self {
        Self {
            date,
            value: round_to_cents(raw_value),
        }
    }
}

/// 按十进制精确舍入到两位小数
///
/// 通过格式化实现，舍入基于浮点数的精确值，避免 `(v * 100.0).round()` 的放大误差
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}
