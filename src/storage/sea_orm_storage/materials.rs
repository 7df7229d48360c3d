//! 学习资料存储操作

use super::db_error;
use crate::entity::study_materials::{ActiveModel, Column, Entity as StudyMaterials};
use crate::errors::Result;
use crate::models::materials::{entities::StudyMaterial, requests::CreateMaterialRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

pub(super) async fn insert_material<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
    uploaded_by: i64,
    req: &CreateMaterialRequest,
) -> Result<StudyMaterial> {
    let model = ActiveModel {
        class_id: Set(class_id),
        title: Set(req.title.clone()),
        description: Set(req.description.clone()),
        file_path: Set(req.file_path.clone()),
        file_type: Set(req.file_type.clone()),
        file_size: Set(req.file_size),
        uploaded_by: Set(uploaded_by),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };

    let result = model
        .insert(conn)
        .await
        .map_err(|e| db_error("上传资料失败", e))?;

    Ok(result.into_material())
}

pub(super) async fn get_material_by_id<C: ConnectionTrait>(
    conn: &C,
    material_id: i64,
) -> Result<Option<StudyMaterial>> {
    let result = StudyMaterials::find_by_id(material_id)
        .one(conn)
        .await
        .map_err(|e| db_error("查询资料失败", e))?;

    Ok(result.map(|m| m.into_material()))
}

pub(super) async fn delete_material<C: ConnectionTrait>(conn: &C, material_id: i64) -> Result<bool> {
    let result = StudyMaterials::delete_by_id(material_id)
        .exec(conn)
        .await
        .map_err(|e| db_error("删除资料失败", e))?;

    Ok(result.rows_affected > 0)
}

/// 列出班级资料，最新上传的在前
pub(super) async fn list_materials<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
) -> Result<Vec<StudyMaterial>> {
    let records = StudyMaterials::find()
        .filter(Column::ClassId.eq(class_id))
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(conn)
        .await
        .map_err(|e| db_error("查询资料列表失败", e))?;

    Ok(records.into_iter().map(|m| m.into_material()).collect())
}
