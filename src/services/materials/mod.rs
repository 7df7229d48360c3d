//! 学习资料
//!
//! 文件内容由调用方保存，这里只记录路径和元数据。

use tracing::info;

use crate::errors::{ClassroomError, Result};
use crate::models::materials::{entities::StudyMaterial, requests::CreateMaterialRequest};
use crate::services::{
    DEFAULT_CONFLICT_RETRIES, classes::detail::check_class_view_permission,
    enrollment::require_owned_class, with_conflict_retry,
};
use crate::storage::Storage;
use crate::utils::validate::{validate_file_size, validate_material_title};

/// 教师向自己的班级上传资料
pub async fn add_material(
    storage: &dyn Storage,
    teacher_id: i64,
    class_id: i64,
    req: CreateMaterialRequest,
) -> Result<StudyMaterial> {
    validate_material_title(&req.title).map_err(ClassroomError::validation)?;
    validate_file_size(req.file_size).map_err(ClassroomError::validation)?;

    with_conflict_retry(DEFAULT_CONFLICT_RETRIES, "material upload", || {
        try_add_material(storage, teacher_id, class_id, &req)
    })
    .await
}

async fn try_add_material(
    storage: &dyn Storage,
    teacher_id: i64,
    class_id: i64,
    req: &CreateMaterialRequest,
) -> Result<StudyMaterial> {
    let tx = storage.begin().await?;
    require_owned_class(&*tx, teacher_id, class_id).await?;

    let material = tx.insert_material(class_id, teacher_id, req).await?;
    tx.commit().await?;

    info!(
        "Material '{}' ({}) added to class {} by teacher {}",
        material.title, material.id, class_id, teacher_id
    );
    Ok(material)
}

/// 列出班级资料，最新的在前
pub async fn list_materials(
    storage: &dyn Storage,
    user_id: i64,
    class_id: i64,
) -> Result<Vec<StudyMaterial>> {
    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("User {user_id} not found")))?;

    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("Class {class_id} not found")))?;

    check_class_view_permission(storage, &user, &class).await?;

    storage.list_materials(class_id).await
}

/// 删除资料，返回被删除的记录以便调用方清理文件
pub async fn delete_material(
    storage: &dyn Storage,
    teacher_id: i64,
    material_id: i64,
) -> Result<StudyMaterial> {
    with_conflict_retry(DEFAULT_CONFLICT_RETRIES, "material deletion", || {
        try_delete_material(storage, teacher_id, material_id)
    })
    .await
}

async fn try_delete_material(
    storage: &dyn Storage,
    teacher_id: i64,
    material_id: i64,
) -> Result<StudyMaterial> {
    let tx = storage.begin().await?;

    let material = tx
        .get_material_by_id(material_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("Material {material_id} not found")))?;

    require_owned_class(&*tx, teacher_id, material.class_id).await?;

    tx.delete_material(material_id).await?;
    tx.commit().await?;

    info!(
        "Material {} removed from class {} by teacher {}",
        material_id, material.class_id, teacher_id
    );
    Ok(material)
}
