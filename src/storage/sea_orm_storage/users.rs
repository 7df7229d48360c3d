//! 用户存储操作

use super::{db_error, unique_violation};
use crate::entity::users::{ActiveModel, Entity as Users};
use crate::errors::{ClassroomError, Result};
use crate::models::users::{entities::User, requests::CreateUserRequest};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, Set};

/// 创建用户
pub(super) async fn create_user<C: ConnectionTrait>(
    conn: &C,
    req: CreateUserRequest,
) -> Result<User> {
    let now = chrono::Utc::now().timestamp();

    let model = ActiveModel {
        username: Set(req.username),
        email: Set(req.email),
        password_hash: Set(req.password_hash),
        full_name: Set(req.full_name),
        is_active: Set(true),
        is_teacher: Set(req.role.is_teacher_flag()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model.insert(conn).await.map_err(|e| {
        if unique_violation(&e).is_some() {
            ClassroomError::user_already_exists("Email or username already registered")
        } else {
            db_error("创建用户失败", e)
        }
    })?;

    Ok(result.into_user())
}

/// 通过 ID 获取用户
pub(super) async fn get_user_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Option<User>> {
    let result = Users::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| db_error("查询用户失败", e))?;

    Ok(result.map(|m| m.into_user()))
}

/// 用户总数
pub(super) async fn count_users<C: ConnectionTrait>(conn: &C) -> Result<u64> {
    Users::find()
        .count(conn)
        .await
        .map_err(|e| db_error("查询用户总数失败", e))
}
