use tracing::info;

use super::require_owned_class;
use crate::errors::{ClassroomError, Result};
use crate::models::classes::{entities::Class, requests::UpdateClassRequest};
use crate::storage::Storage;
use crate::utils::validate::validate_class_name;

/// 更新班级
///
/// 名称、描述、归档状态相互独立；改名时同一教师下不能与其他班级重名（精确匹配）。
/// 空的更新请求直接返回当前班级。
pub async fn update_class(
    storage: &dyn Storage,
    teacher_id: i64,
    class_id: i64,
    req: UpdateClassRequest,
) -> Result<Class> {
    if let Some(ref name) = req.name {
        validate_class_name(name).map_err(ClassroomError::validation)?;
    }

    let tx = storage.begin().await?;

    let class = require_owned_class(&*tx, teacher_id, class_id).await?;

    if req.is_empty() {
        return Ok(class);
    }

    if let Some(ref name) = req.name {
        let existing = tx
            .find_class_by_teacher_and_name(teacher_id, name, Some(class_id))
            .await?;
        if existing.is_some() {
            return Err(ClassroomError::duplicate_name(format!(
                "You already have another class named '{name}'"
            )));
        }
    }

    let updated = tx.update_class(class_id, &req).await?;
    tx.commit().await?;

    if class.is_archived != updated.is_archived {
        info!(
            "Class {} {} by teacher {}",
            class_id,
            if updated.is_archived { "archived" } else { "unarchived" },
            teacher_id
        );
    } else {
        info!("Class {} updated by teacher {}", class_id, teacher_id);
    }

    Ok(updated)
}
