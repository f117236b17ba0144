//! 应用层

mod context;
pub mod queries;

pub use context::*;
