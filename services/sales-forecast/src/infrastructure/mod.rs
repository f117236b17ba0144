//! 基础设施层

mod csv_observation_source;
mod model_store;

pub use csv_observation_source::*;
pub use model_store::*;
