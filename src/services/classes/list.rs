use tracing::debug;

use crate::errors::{ClassroomError, Result};
use crate::models::classes::responses::ClassSummary;
use crate::models::users::entities::UserRole;
use crate::storage::Storage;

/// 列出当前用户的班级
///
/// 教师返回自己创建的班级，学生返回已加入的班级，均按创建时间倒序。
/// 默认不包含已归档的班级。
pub async fn list_my_classes(
    storage: &dyn Storage,
    user_id: i64,
    include_archived: bool,
) -> Result<Vec<ClassSummary>> {
    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("User {user_id} not found")))?;

    let classes = match user.role {
        UserRole::Teacher => {
            storage
                .list_teacher_classes(user_id, include_archived)
                .await?
        }
        UserRole::Student => {
            storage
                .list_student_classes(user_id, include_archived)
                .await?
        }
    };

    let mut summaries = Vec::with_capacity(classes.len());
    for class in classes {
        let count = storage.count_class_students(class.id).await?;
        summaries.push(ClassSummary::new(class, count));
    }

    debug!(
        "Listed {} class(es) for {} {}",
        summaries.len(),
        user.role,
        user_id
    );

    Ok(summaries)
}
