use tracing::info;

use crate::errors::{ClassroomError, Result};
use crate::models::enrollments::entities::Enrollment;
use crate::models::users::entities::UserRole;
use crate::services::require_user;
use crate::storage::Storage;
use crate::utils::join_code;

/// 学生通过邀请码加入班级
///
/// 邀请码不区分大小写，可以带分隔符（`a7-9b-c3` 与 `A79BC3` 等价）。
pub async fn join_class(
    storage: &dyn Storage,
    student_id: i64,
    raw_code: &str,
) -> Result<Enrollment> {
    let code = join_code::normalize(raw_code);
    let tx = storage.begin().await?;

    let student = require_user(&*tx, student_id).await?;
    match student.role {
        UserRole::Student => {}
        UserRole::Teacher => {
            return Err(ClassroomError::forbidden(
                "Teachers cannot join classes as students",
            ));
        }
    }

    let class = if join_code::is_canonical(&code) {
        tx.get_class_by_join_code(&code).await?
    } else {
        None
    };
    let class = class.ok_or_else(|| {
        ClassroomError::not_found("Invalid join code. Please check and try again.")
    })?;

    if class.is_archived {
        return Err(ClassroomError::class_archived(
            "This class is archived and no longer accepting new students",
        ));
    }

    if tx.get_enrollment(student_id, class.id).await?.is_some() {
        return Err(ClassroomError::already_enrolled(
            "You are already enrolled in this class",
        ));
    }

    // 并发加入时由唯一索引兜底，插入失败同样返回 AlreadyEnrolled
    let enrollment = tx.insert_enrollment(student_id, class.id).await?;
    tx.commit().await?;

    info!(
        "Student {} joined class {} with code {}",
        student_id,
        class.id,
        join_code::format(&code)
    );

    Ok(enrollment)
}
