//! 领域服务

mod data_anchor;
mod forecast_engine;

pub use data_anchor::*;
pub use forecast_engine::*;
