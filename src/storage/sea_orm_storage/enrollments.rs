//! 选课存储操作

use super::{db_error, unique_violation};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::prelude::Users;
use crate::errors::{ClassroomError, Result};
use crate::models::{enrollments::entities::Enrollment, users::entities::User};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

/// 插入选课记录
///
/// 与并发的重复加入竞争时由唯一索引兜底，冲突翻译为 `AlreadyEnrolled`。
pub(super) async fn insert_enrollment<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    class_id: i64,
) -> Result<Enrollment> {
    let now = chrono::Utc::now().timestamp();

    let model = ActiveModel {
        student_id: Set(student_id),
        class_id: Set(class_id),
        enrolled_at: Set(now),
        ..Default::default()
    };

    let result = model.insert(conn).await.map_err(|e| {
        if unique_violation(&e).is_some() {
            ClassroomError::already_enrolled("You are already enrolled in this class")
        } else {
            db_error("加入班级失败", e)
        }
    })?;

    Ok(result.into_enrollment())
}

/// 删除选课记录
pub(super) async fn delete_enrollment<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    class_id: i64,
) -> Result<bool> {
    let result = Enrollments::delete_many()
        .filter(
            Condition::all()
                .add(Column::StudentId.eq(student_id))
                .add(Column::ClassId.eq(class_id)),
        )
        .exec(conn)
        .await
        .map_err(|e| db_error("移除学生失败", e))?;

    Ok(result.rows_affected > 0)
}

/// 获取学生在班级中的选课记录
pub(super) async fn get_enrollment<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    class_id: i64,
) -> Result<Option<Enrollment>> {
    let result = Enrollments::find()
        .filter(
            Condition::all()
                .add(Column::StudentId.eq(student_id))
                .add(Column::ClassId.eq(class_id)),
        )
        .one(conn)
        .await
        .map_err(|e| db_error("查询选课记录失败", e))?;

    Ok(result.map(|m| m.into_enrollment()))
}

/// 列出学生的全部选课记录
pub(super) async fn list_student_enrollments<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
) -> Result<Vec<Enrollment>> {
    let records = Enrollments::find()
        .filter(Column::StudentId.eq(student_id))
        .order_by_asc(Column::EnrolledAt)
        .order_by_asc(Column::Id)
        .all(conn)
        .await
        .map_err(|e| db_error("查询选课记录失败", e))?;

    Ok(records.into_iter().map(|m| m.into_enrollment()).collect())
}

/// 列出班级中的学生
pub(super) async fn list_class_students<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
) -> Result<Vec<(Enrollment, User)>> {
    let records = Enrollments::find()
        .filter(Column::ClassId.eq(class_id))
        .order_by_asc(Column::EnrolledAt)
        .order_by_asc(Column::Id)
        .find_also_related(Users)
        .all(conn)
        .await
        .map_err(|e| db_error("查询班级学生失败", e))?;

    // 外键保证学生存在，这里只是防御已被删除的用户
    Ok(records
        .into_iter()
        .filter_map(|(enrollment, user)| {
            user.map(|u| (enrollment.into_enrollment(), u.into_user()))
        })
        .collect())
}

/// 班级学生人数
pub(super) async fn count_class_students<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
) -> Result<i64> {
    let count = Enrollments::find()
        .filter(Column::ClassId.eq(class_id))
        .count(conn)
        .await
        .map_err(|e| db_error("查询班级人数失败", e))?;

    Ok(count as i64)
}
