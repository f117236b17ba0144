//! 已拟合的 ARIMA(p, d, q) 模型
//!
//! 在 d 阶差分序列上递推：
//!
//! ```text
//! y_t = c + Σ φ_j (y_{t-j} - c) + Σ θ_j e_{t-j}
//! ```
//!
//! 其中 c 为差分序列均值，未来残差取 0，最后逐阶积分回原始尺度。

use salescast_ports::{Forecastable, ModelError};
use serde::{Deserialize, Serialize};

use super::{all_finite, reserve_steps, ArtifactError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArimaModel {
    /// (p, d, q)
    pub order: (usize, usize, usize),
    /// AR 系数 φ_1..φ_p
    #[serde(default)]
    pub ar: Vec<f64>,
    /// MA 系数 θ_1..θ_q
    #[serde(default)]
    pub ma: Vec<f64>,
    /// 差分序列均值
    #[serde(default)]
    pub constant: f64,
    /// 原始尺度的历史尾部，按时间升序，至少 d + p 个值
    #[serde(default)]
    pub history: Vec<f64>,
    /// 差分尺度的拟合残差，按时间升序
    #[serde(default)]
    pub residuals: Vec<f64>,
}

impl ArimaModel {
    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        let (p, d, q) = self.order;

        if self.ar.len() != p {
            return Err(ArtifactError::new(
                "arima",
                format!("expected {} AR coefficients, found {}", p, self.ar.len()),
            ));
        }
        if self.ma.len() != q {
            return Err(ArtifactError::new(
                "arima",
                format!("expected {} MA coefficients, found {}", q, self.ma.len()),
            ));
        }
        if self.history.len() < d + p {
            return Err(ArtifactError::new(
                "arima",
                format!(
                    "history needs at least {} values for order ({}, {}, {}), found {}",
                    d + p,
                    p,
                    d,
                    q,
                    self.history.len()
                ),
            ));
        }
        if !self.constant.is_finite()
            || !all_finite(&self.ar)
            || !all_finite(&self.ma)
            || !all_finite(&self.history)
            || !all_finite(&self.residuals)
        {
            return Err(ArtifactError::new("arima", "contains NaN or infinite values"));
        }

        Ok(())
    }
}

impl Forecastable for ArimaModel {
    fn forecast(&self, steps: usize) -> Result<Vec<f64>, ModelError> {
        if steps == 0 {
            return Err(ModelError::InvalidSteps);
        }

        let d = self.order.1;

        // 每一阶差分前的最后一个值，用于积分还原
        let mut tails = Vec::with_capacity(d);
        let mut series = self.history.clone();
        for _ in 0..d {
            let last = series
                .last()
                .copied()
                .ok_or_else(|| ModelError::Failed("history too short to integrate".into()))?;
            tails.push(last);
            series = difference(&series);
        }

        let start = series.len();
        reserve_steps(&mut series, steps)?;
        let mut residuals = self.residuals.clone();
        reserve_steps(&mut residuals, steps)?;

        for _ in 0..steps {
            let mut next = self.constant;

            for (j, phi) in self.ar.iter().enumerate() {
                next += phi * (series[series.len() - 1 - j] - self.constant);
            }

            for (j, theta) in self.ma.iter().enumerate() {
                if residuals.len() > j {
                    next += theta * residuals[residuals.len() - 1 - j];
                }
            }

            series.push(next);
            residuals.push(0.0);
        }

        series.drain(..start);
        let mut forecasts = series;
        for tail in tails.iter().rev() {
            let mut level = *tail;
            for value in forecasts.iter_mut() {
                level += *value;
                *value = level;
            }
        }

        Ok(forecasts)
    }

    fn kind(&self) -> &'static str {
        "arima"
    }
}

fn difference(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|w| w[1] - w[0]).collect()
}
