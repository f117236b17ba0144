//! ports - 抽象 trait 层
//!
//! 定义预测服务依赖的外部能力接口

mod forecastable;
mod observation_source;

pub use forecastable::*;
pub use observation_source::*;
