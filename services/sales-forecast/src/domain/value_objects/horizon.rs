//! 预测天数值对象

use std::fmt;

use crate::error::ValidationError;

/// 预测天数（N >= 1）
///
/// 不设上限，N 原样传给模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ForecastHorizon(usize);

impl ForecastHorizon {
    pub fn new(days: usize) -> Result<Self, ValidationError> {
        if days == 0 {
            return Err(ValidationError::NotPositive { value: 0 });
        }
        Ok(Self(days))
    }

    /// 解析 `days` 查询参数，缺省时使用 `default`
    pub fn parse(raw: Option<&str>, default: ForecastHorizon) -> Result<Self, ValidationError> {
        let Some(raw) = raw else {
            return Ok(default);
        };

        let value: i64 = strip_digit_separators(raw.trim())
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| ValidationError::NotAnInteger { raw: raw.to_string() })?;

        if value <= 0 {
            return Err(ValidationError::NotPositive { value });
        }

        usize::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::NotAnInteger { raw: raw.to_string() })
    }

    pub fn days(&self) -> usize {
        self.0
    }
}

/// 去掉数字之间的单个下划线（`1_000` → `1000`）
///
/// 下划线出现在开头、结尾、符号后或连续出现时视为非法
fn strip_digit_separators(raw: &str) -> Option<String> {
    let (sign, digits) = match raw.strip_prefix(['+', '-']) {
        Some(rest) => (&raw[..1], rest),
        None => ("", raw),
    };
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return None;
    }
    Some(format!("{}{}", sign, digits.replace('_', "")))
}

impl fmt::Display for ForecastHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
