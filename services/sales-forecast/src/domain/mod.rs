//! 领域层

pub mod models;
pub mod services;
pub mod value_objects;
