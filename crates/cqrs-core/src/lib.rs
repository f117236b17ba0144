//! salescast-cqrs-core - CQRS 核心库
//!
//! Query / QueryHandler trait

mod query;

pub use query::*;
