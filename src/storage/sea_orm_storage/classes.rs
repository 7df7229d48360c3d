//! 班级存储操作

use super::{db_error, unique_violation};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::enrollments::Column as EnrollmentColumn;
use crate::entity::prelude::{Enrollments, StudyMaterials};
use crate::entity::study_materials::Column as MaterialColumn;
use crate::errors::{ClassroomError, Result};
use crate::models::classes::{
    entities::Class,
    requests::{CreateClassRequest, UpdateClassRequest},
};
use crate::utils::join_code;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

/// 插入班级
///
/// 邀请码唯一索引冲突返回 `StoreConflict`（可换码重试），班级名冲突返回 `DuplicateName`。
pub(super) async fn insert_class<C: ConnectionTrait>(
    conn: &C,
    teacher_id: i64,
    req: &CreateClassRequest,
    code: &str,
) -> Result<Class> {
    let now = chrono::Utc::now().timestamp();

    let model = ActiveModel {
        teacher_id: Set(teacher_id),
        name: Set(req.name.clone()),
        description: Set(req.description.clone()),
        join_code: Set(code.to_string()),
        is_archived: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model.insert(conn).await.map_err(|e| match unique_violation(&e) {
        Some(detail) if detail.contains("join_code") => ClassroomError::store_conflict(format!(
            "Join code {} was taken by a concurrent request",
            join_code::format(code)
        )),
        Some(_) => ClassroomError::duplicate_name(format!(
            "You already have a class named '{}'",
            req.name
        )),
        None => db_error("创建班级失败", e),
    })?;

    Ok(result.into_class())
}

/// 通过 ID 获取班级
pub(super) async fn get_class_by_id<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
) -> Result<Option<Class>> {
    let result = Classes::find_by_id(class_id)
        .one(conn)
        .await
        .map_err(|e| db_error("查询班级失败", e))?;

    Ok(result.map(|m| m.into_class()))
}

/// 通过邀请码获取班级
///
/// 库中只保存规范形式，查询前先规范化输入即可实现不区分大小写的匹配。
pub(super) async fn get_class_by_join_code<C: ConnectionTrait>(
    conn: &C,
    code: &str,
) -> Result<Option<Class>> {
    let canonical = join_code::normalize(code);
    let result = Classes::find()
        .filter(Column::JoinCode.eq(canonical))
        .one(conn)
        .await
        .map_err(|e| db_error("查询班级失败", e))?;

    Ok(result.map(|m| m.into_class()))
}

/// 邀请码是否已被占用
pub(super) async fn join_code_exists<C: ConnectionTrait>(conn: &C, code: &str) -> Result<bool> {
    let canonical = join_code::normalize(code);
    let count = Classes::find()
        .filter(Column::JoinCode.eq(canonical))
        .count(conn)
        .await
        .map_err(|e| db_error("查询邀请码失败", e))?;

    Ok(count > 0)
}

/// 按教师和名称查找班级（精确匹配）
pub(super) async fn find_class_by_teacher_and_name<C: ConnectionTrait>(
    conn: &C,
    teacher_id: i64,
    name: &str,
    exclude_class_id: Option<i64>,
) -> Result<Option<Class>> {
    let mut condition = Condition::all()
        .add(Column::TeacherId.eq(teacher_id))
        .add(Column::Name.eq(name));

    if let Some(class_id) = exclude_class_id {
        condition = condition.add(Column::Id.ne(class_id));
    }

    let result = Classes::find()
        .filter(condition)
        .one(conn)
        .await
        .map_err(|e| db_error("查询班级失败", e))?;

    Ok(result.map(|m| m.into_class()))
}

/// 列出教师的班级
pub(super) async fn list_teacher_classes<C: ConnectionTrait>(
    conn: &C,
    teacher_id: i64,
    include_archived: bool,
) -> Result<Vec<Class>> {
    let mut select = Classes::find().filter(Column::TeacherId.eq(teacher_id));

    if !include_archived {
        select = select.filter(Column::IsArchived.eq(false));
    }

    let classes = select
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(conn)
        .await
        .map_err(|e| db_error("查询教师班级失败", e))?;

    Ok(classes.into_iter().map(|m| m.into_class()).collect())
}

/// 列出学生加入的班级
pub(super) async fn list_student_classes<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    include_archived: bool,
) -> Result<Vec<Class>> {
    // 查询学生加入的班级 ID
    let enrollment_records = Enrollments::find()
        .filter(EnrollmentColumn::StudentId.eq(student_id))
        .all(conn)
        .await
        .map_err(|e| db_error("查询学生选课记录失败", e))?;

    let class_ids: Vec<i64> = enrollment_records.iter().map(|e| e.class_id).collect();

    if class_ids.is_empty() {
        return Ok(vec![]);
    }

    let mut select = Classes::find().filter(Column::Id.is_in(class_ids));

    if !include_archived {
        select = select.filter(Column::IsArchived.eq(false));
    }

    let classes = select
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(conn)
        .await
        .map_err(|e| db_error("查询学生班级失败", e))?;

    Ok(classes.into_iter().map(|m| m.into_class()).collect())
}

/// 班级总数
pub(super) async fn count_classes<C: ConnectionTrait>(conn: &C) -> Result<u64> {
    Classes::find()
        .count(conn)
        .await
        .map_err(|e| db_error("查询班级总数失败", e))
}

/// 更新班级信息
///
/// 调用方需先确认班级存在。改名与其他班级冲突时返回 `DuplicateName`。
pub(super) async fn update_class<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
    update: &UpdateClassRequest,
) -> Result<Class> {
    let now = chrono::Utc::now().timestamp();

    let mut model = ActiveModel {
        id: Set(class_id),
        updated_at: Set(now),
        ..Default::default()
    };

    if let Some(ref name) = update.name {
        model.name = Set(name.clone());
    }

    if let Some(ref description) = update.description {
        model.description = Set(Some(description.clone()));
    }

    if let Some(is_archived) = update.is_archived {
        model.is_archived = Set(is_archived);
    }

    let result = model.update(conn).await.map_err(|e| {
        if unique_violation(&e).is_some() {
            ClassroomError::duplicate_name(format!(
                "You already have another class named '{}'",
                update.name.as_deref().unwrap_or_default()
            ))
        } else {
            db_error("更新班级失败", e)
        }
    })?;

    Ok(result.into_class())
}

/// 删除班级
///
/// 显式删除资料和选课记录后再删除班级，不依赖数据库的级联删除。
pub(super) async fn delete_class<C: ConnectionTrait>(conn: &C, class_id: i64) -> Result<bool> {
    StudyMaterials::delete_many()
        .filter(MaterialColumn::ClassId.eq(class_id))
        .exec(conn)
        .await
        .map_err(|e| db_error("删除班级资料失败", e))?;

    Enrollments::delete_many()
        .filter(EnrollmentColumn::ClassId.eq(class_id))
        .exec(conn)
        .await
        .map_err(|e| db_error("删除班级选课记录失败", e))?;

    let result = Classes::delete_by_id(class_id)
        .exec(conn)
        .await
        .map_err(|e| db_error("删除班级失败", e))?;

    Ok(result.rows_affected > 0)
}
