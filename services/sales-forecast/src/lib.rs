//! Sales Forecast Service Library
//!
//! 分层架构：
//! - `domain`: 预测天数、预测点、已拟合模型、锚定日期推导、预测引擎
//! - `infrastructure`: 模型文件加载、CSV 观测数据源
//! - `application`: 启动上下文、预测查询处理器
//! - `api`: HTTP 路由

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
