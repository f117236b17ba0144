//! 查询

mod forecast_query;

pub use forecast_query::*;
