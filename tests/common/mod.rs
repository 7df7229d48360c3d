use std::sync::Arc;

use tempfile::TempDir;

use classroom_core::config::{DatabaseConfig, JoinCodeConfig};
use classroom_core::models::classes::{entities::Class, requests::CreateClassRequest};
use classroom_core::models::users::{
    entities::{User, UserRole},
    requests::CreateUserRequest,
};
use classroom_core::services::EnrollmentService;
use classroom_core::storage::{Storage, create_storage_with};

/// 每个测试使用独立的内存数据库
pub async fn setup_storage() -> Arc<dyn Storage> {
    create_storage_with(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to create in-memory storage")
}

/// 临时目录中的 SQLite 文件数据库（WAL，多连接），并发测试使用
///
/// 返回的 `TempDir` 必须在测试结束前保持存活。
#[allow(dead_code)]
pub async fn setup_file_storage(pool_size: u32) -> (TempDir, Arc<dyn Storage>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("classroom.db");
    let storage = create_storage_with(&DatabaseConfig {
        url: path.to_string_lossy().into_owned(),
        pool_size,
        timeout: 5,
    })
    .await
    .expect("Failed to create file-backed storage");
    (dir, storage)
}

#[allow(dead_code)]
pub fn service() -> EnrollmentService {
    EnrollmentService::new(JoinCodeConfig::default())
}

async fn create_user(storage: &dyn Storage, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            full_name: Some(format!("Test {username}")),
            role,
        })
        .await
        .expect("Failed to create test user")
}

#[allow(dead_code)]
pub async fn create_teacher(storage: &dyn Storage, username: &str) -> User {
    create_user(storage, username, UserRole::Teacher).await
}

#[allow(dead_code)]
pub async fn create_student(storage: &dyn Storage, username: &str) -> User {
    create_user(storage, username, UserRole::Student).await
}

#[allow(dead_code)]
pub fn class_request(name: &str) -> CreateClassRequest {
    CreateClassRequest {
        name: name.to_string(),
        description: None,
    }
}

/// 创建班级，失败直接 panic
#[allow(dead_code)]
pub async fn create_class(storage: &dyn Storage, teacher_id: i64, name: &str) -> Class {
    service()
        .create_class(storage, teacher_id, class_request(name))
        .await
        .expect("Failed to create test class")
}
