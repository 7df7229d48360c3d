use tracing::info;

use super::EnrollmentService;
use crate::errors::{ClassroomError, Result};
use crate::models::classes::{entities::Class, requests::CreateClassRequest};
use crate::models::users::entities::UserRole;
use crate::services::{require_user, with_conflict_retry};
use crate::storage::{Storage, StorageTx};
use crate::utils::{join_code, validate::validate_class_name};

pub async fn create_class(
    service: &EnrollmentService,
    storage: &dyn Storage,
    teacher_id: i64,
    req: CreateClassRequest,
) -> Result<Class> {
    validate_class_name(&req.name).map_err(ClassroomError::validation)?;

    // 邀请码在检查和插入之间被并发请求占用，或写锁竞争时，开新事务换一个码重试
    with_conflict_retry(service.max_conflict_retries(), "class creation", || {
        try_create_class(service, storage, teacher_id, &req)
    })
    .await
}

/// 单次尝试：校验、生成邀请码、插入，全部在一个事务内
async fn try_create_class(
    service: &EnrollmentService,
    storage: &dyn Storage,
    teacher_id: i64,
    req: &CreateClassRequest,
) -> Result<Class> {
    let tx = storage.begin().await?;

    check_class_create_permission(&*tx, teacher_id).await?;

    if tx
        .find_class_by_teacher_and_name(teacher_id, &req.name, None)
        .await?
        .is_some()
    {
        return Err(ClassroomError::duplicate_name(format!(
            "You already have a class named '{}'",
            req.name
        )));
    }

    let tx_ref: &dyn StorageTx = &*tx;
    let code = service
        .generator()
        .generate(|candidate| async move { tx_ref.join_code_exists(&candidate).await })
        .await?;

    let class = tx.insert_class(teacher_id, req, &code).await?;
    tx.commit().await?;

    info!(
        "Class '{}' ({}) created by teacher {} with join code {}",
        class.name,
        class.id,
        teacher_id,
        join_code::format(&class.join_code)
    );

    Ok(class)
}

/// 只有教师可以创建班级
async fn check_class_create_permission(tx: &dyn StorageTx, teacher_id: i64) -> Result<()> {
    let user = require_user(tx, teacher_id).await?;
    match user.role {
        UserRole::Teacher => Ok(()),
        UserRole::Student => Err(ClassroomError::forbidden(
            "Only teachers can create classes",
        )),
    }
}
