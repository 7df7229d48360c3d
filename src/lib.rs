//! Classroom - 班级管理后端核心
//!
//! 教师创建班级并获得唯一的邀请码，学生凭邀请码加入班级。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（班级、选课、资料）
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 邀请码与校验工具

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
