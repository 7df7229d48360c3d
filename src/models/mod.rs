//! 数据模型定义
//!
//! 业务实体与请求/响应结构，和 `entity` 中的数据库实体分离。

pub mod classes;
pub mod common;
pub mod enrollments;
pub mod materials;
pub mod users;

pub use common::{ApiResponse, ErrorCode};
