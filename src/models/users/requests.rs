use super::entities::UserRole;
use serde::Deserialize;

// 用户创建请求
//
// password_hash 由调用方负责哈希，存储层只保存不解析。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: UserRole,
}
