//! 已拟合的 Holt 线性（可阻尼）指数平滑模型
//!
//! ```text
//! F_{t+h} = L_t + (φ + φ² + … + φ^h) T_t
//! ```
//!
//! 未设置阻尼时 φ = 1，即 F_{t+h} = L_t + h T_t。

use salescast_ports::{Forecastable, ModelError};
use serde::{Deserialize, Serialize};

use super::{reserve_steps, ArtifactError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoltModel {
    /// 最后一期的水平 L_t
    pub level: f64,
    /// 最后一期的趋势 T_t
    pub trend: f64,
    /// 阻尼系数 φ ∈ (0, 1]
    #[serde(default)]
    pub damping: Option<f64>,
}

impl HoltModel {
    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        if !self.level.is_finite() || !self.trend.is_finite() {
            return Err(ArtifactError::new("holt", "level and trend must be finite"));
        }
        if let Some(phi) = self.damping {
            if !phi.is_finite() || phi <= 0.0 || phi > 1.0 {
                return Err(ArtifactError::new(
                    "holt",
                    format!("damping must be in (0, 1], found {}", phi),
                ));
            }
        }
        Ok(())
    }
}

impl Forecastable for HoltModel {
    fn forecast(&self, steps: usize) -> Result<Vec<f64>, ModelError> {
        if steps == 0 {
            return Err(ModelError::InvalidSteps);
        }

        let phi = self.damping.unwrap_or(1.0);
        let mut factor = 1.0;
        let mut damped_sum = 0.0;

        let mut values = Vec::new();
        reserve_steps(&mut values, steps)?;
        for _ in 0..steps {
            factor *= phi;
            damped_sum += factor;
            values.push(self.level + damped_sum * self.trend);
        }

        Ok(values)
    }

    fn kind(&self) -> &'static str {
        "holt"
    }
}
