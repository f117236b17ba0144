//! HTTP 接口

mod dto;
mod routes;

pub use dto::*;
pub use routes::*;
