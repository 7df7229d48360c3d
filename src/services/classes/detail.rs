use crate::errors::{ClassroomError, Result};
use crate::models::classes::{
    entities::Class,
    responses::{ClassDetail, ClassSummary, StudentInClass},
};
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

/// 获取班级详情及学生名单
///
/// 教师只能查看自己的班级，学生只能查看已加入的班级。
pub async fn get_class_detail(
    storage: &dyn Storage,
    user_id: i64,
    class_id: i64,
) -> Result<ClassDetail> {
    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("User {user_id} not found")))?;

    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("Class {class_id} not found")))?;

    check_class_view_permission(storage, &user, &class).await?;

    let students: Vec<StudentInClass> = storage
        .list_class_students(class_id)
        .await?
        .into_iter()
        .map(|(enrollment, student)| StudentInClass {
            id: student.id,
            username: student.username,
            full_name: student.full_name,
            email: student.email,
            enrolled_at: enrollment.enrolled_at,
        })
        .collect();

    Ok(ClassDetail {
        summary: ClassSummary::new(class, students.len() as i64),
        students,
    })
}

/// 班级成员（所属教师或已加入的学生）才能查看
pub(crate) async fn check_class_view_permission(
    storage: &dyn Storage,
    user: &User,
    class: &Class,
) -> Result<()> {
    match user.role {
        UserRole::Teacher => {
            if !class.is_owned_by(user.id) {
                return Err(ClassroomError::forbidden(
                    "You don't have permission to view this class",
                ));
            }
        }
        UserRole::Student => {
            if storage.get_enrollment(user.id, class.id).await?.is_none() {
                return Err(ClassroomError::forbidden(
                    "You are not enrolled in this class",
                ));
            }
        }
    }
    Ok(())
}
