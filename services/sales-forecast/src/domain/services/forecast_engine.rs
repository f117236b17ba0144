//! 预测引擎
//!
//! 第 i 个模型输出固定对应 `anchor + i` 天（i 从 1 开始），
//! 输出顺序与模型输出顺序一致，不重排、不过滤。

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use salescast_ports::Forecastable;

use crate::domain::value_objects::{ForecastHorizon, ForecastPoint};
use crate::error::ForecastError;

/// 预测引擎，持有启动时加载的模型和锚定日期（只读）
pub struct ForecastEngine {
    model: Option<Arc<dyn Forecastable>>,
    anchor: Option<NaiveDate>,
}

impl ForecastEngine {
    pub fn new(model: Option<Arc<dyn Forecastable>>, anchor: Option<NaiveDate>) -> Self {
        Self { model, anchor }
    }

    /// 模型和锚定日期是否都已加载
    pub fn is_ready(&self) -> bool {
        self.model.is_some() && self.anchor.is_some()
    }

    /// 生成 N 个按日期连续递增的预测点
    pub fn forecast(&self, horizon: ForecastHorizon) -> Result<Vec<ForecastPoint>, ForecastError> {
        let (Some(model), Some(anchor)) = (self.model.as_ref(), self.anchor) else {
            return Err(ForecastError::ResourcesUnavailable);
        };

        let steps = horizon.days();

        // 最后一天超出日历范围时不调用模型，也不为无法输出的结果分配内存
        let last_offset = steps as u64;
        anchor
            .checked_add_days(Days::new(last_offset))
            .ok_or(ForecastError::DateOutOfRange {
                anchor,
                offset: last_offset,
            })?;

        let values = model
            .forecast(steps)
            .map_err(|e| ForecastError::ModelFailure(e.to_string()))?;

        if values.len() != steps {
            return Err(ForecastError::ModelFailure(format!(
                "model returned {} values, expected {}",
                values.len(),
                steps
            )));
        }

        let mut points = Vec::new();
        points.try_reserve_exact(steps).map_err(|e| {
            ForecastError::ModelFailure(format!("cannot allocate {steps} forecast points: {e}"))
        })?;
        for (value, offset) in values.into_iter().zip(1u64..) {
            let date = anchor
                .checked_add_days(Days::new(offset))
                .ok_or(ForecastError::DateOutOfRange { anchor, offset })?;
            points.push(ForecastPoint::new(date, value));
        }

        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salescast_ports::ModelError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 返回 1.111, 2.222, ... 并统计调用次数
    #[derive(Default)]
    struct CountingModel {
        calls: AtomicUsize,
    }

    impl Forecastable for CountingModel {
        fn forecast(&self, steps: usize) -> Result<Vec<f64>, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((1..=steps).map(|i| i as f64 * 1.111).collect())
        }

        fn kind(&self) -> &'static str {
            "counting"
        }
    }

    struct FailingModel;

    impl Forecastable for FailingModel {
        fn forecast(&self, _steps: usize) -> Result<Vec<f64>, ModelError> {
            Err(ModelError::Failed("matrix is singular".into()))
        }

        fn kind(&self) -> &'static str {
            "failing"
        }
    }

    struct ShortModel;

    impl Forecastable for ShortModel {
        fn forecast(&self, steps: usize) -> Result<Vec<f64>, ModelError> {
            Ok(vec![1.0; steps - 1])
        }

        fn kind(&self) -> &'static str {
            "short"
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn horizon(days: usize) -> ForecastHorizon {
        ForecastHorizon::new(days).unwrap()
    }

    #[test]
    fn test_dates_follow_anchor() {
        let engine = ForecastEngine::new(Some(Arc::new(CountingModel::default())), Some(date(2024, 1, 31)));
        let points = engine.forecast(horizon(3)).unwrap();

        let dates: Vec<_> = points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date(2024, 2, 1), date(2024, 2, 2), date(2024, 2, 3)]);

        let values: Vec<_> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.11, 2.22, 3.33]);
    }

    #[test]
    fn test_dates_are_contiguous_across_month_and_leap_day() {
        let anchor = date(2024, 2, 27);
        let engine = ForecastEngine::new(Some(Arc::new(CountingModel::default())), Some(anchor));
        let points = engine.forecast(horizon(40)).unwrap();

        assert_eq!(points.len(), 40);
        assert_eq!(points[1].date, date(2024, 2, 29));
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.date, anchor + Days::new(i as u64 + 1));
        }
        for pair in points.windows(2) {
            assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        }
    }

    #[test]
    fn test_missing_resources_skip_model() {
        let model = Arc::new(CountingModel::default());

        let engine = ForecastEngine::new(Some(model.clone()), None);
        assert_eq!(engine.forecast(horizon(5)), Err(ForecastError::ResourcesUnavailable));

        let engine = ForecastEngine::new(None, Some(date(2024, 1, 1)));
        assert_eq!(engine.forecast(horizon(5)), Err(ForecastError::ResourcesUnavailable));

        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_model_error_is_model_failure() {
        let engine = ForecastEngine::new(Some(Arc::new(FailingModel)), Some(date(2024, 1, 1)));
        assert_eq!(
            engine.forecast(horizon(2)),
            Err(ForecastError::ModelFailure("matrix is singular".into()))
        );
    }

    #[test]
    fn test_wrong_output_length_is_model_failure() {
        let engine = ForecastEngine::new(Some(Arc::new(ShortModel)), Some(date(2024, 1, 1)));
        assert!(matches!(
            engine.forecast(horizon(4)),
            Err(ForecastError::ModelFailure(_))
        ));
    }

    #[test]
    fn test_date_overflow() {
        let engine = ForecastEngine::new(Some(Arc::new(CountingModel::default())), Some(NaiveDate::MAX));
        assert_eq!(
            engine.forecast(horizon(1)),
            Err(ForecastError::DateOutOfRange {
                anchor: NaiveDate::MAX,
                offset: 1
            })
        );
    }

    #[test]
    fn test_horizon_past_calendar_end_skips_model() {
        let model = Arc::new(CountingModel::default());
        let engine = ForecastEngine::new(Some(model.clone()), Some(date(2024, 1, 31)));
        assert_eq!(
            engine.forecast(horizon(100_000_000_000)),
            Err(ForecastError::DateOutOfRange {
                anchor: date(2024, 1, 31),
                offset: 100_000_000_000
            })
        );
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_one_model_call_per_forecast() {
        let model = Arc::new(CountingModel::default());
        let engine = ForecastEngine::new(Some(model.clone()), Some(date(2024, 1, 1)));
        let first = engine.forecast(horizon(7)).unwrap();
        let second = engine.forecast(horizon(7)).unwrap();
        assert_eq!(first, second);
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
    }
}
