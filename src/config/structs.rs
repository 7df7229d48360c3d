use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub join_code: JoinCodeConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

impl DatabaseConfig {
    /// 单连接的内存 SQLite，用于测试
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        }
    }
}

/// 邀请码配置
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JoinCodeConfig {
    pub max_attempts: u32,         // 单次生成的最大抽取次数
    pub max_conflict_retries: u32, // 邀请码冲突或并发写入冲突时的最大重试次数
}

impl Default for JoinCodeConfig {
    fn default() -> Self {
        Self {
            max_attempts: crate::utils::join_code::DEFAULT_MAX_ATTEMPTS,
            max_conflict_retries: 3,
        }
    }
}
