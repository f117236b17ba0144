//! 值对象

mod forecast_point;
mod horizon;

pub use forecast_point::*;
pub use horizon::*;
