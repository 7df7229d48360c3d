//! 事务内的存储操作
//!
//! 包装 `DatabaseTransaction`，复用各子模块的泛型查询函数。
//! 未调用 `commit` 即被丢弃时，SeaORM 会回滚事务。

use super::{classes, db_error, enrollments, materials, users};
use crate::errors::Result;
use crate::models::{
    classes::{
        entities::Class,
        requests::{CreateClassRequest, UpdateClassRequest},
    },
    enrollments::entities::Enrollment,
    materials::{entities::StudyMaterial, requests::CreateMaterialRequest},
    users::entities::User,
};
use crate::storage::StorageTx;
use async_trait::async_trait;
use sea_orm::DatabaseTransaction;

pub struct SeaOrmTransaction {
    txn: DatabaseTransaction,
}

impl SeaOrmTransaction {
    pub fn new(txn: DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl StorageTx for SeaOrmTransaction {
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        users::get_user_by_id(&self.txn, id).await
    }

    // 班级
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        classes::get_class_by_id(&self.txn, class_id).await
    }

    async fn get_class_by_join_code(&self, join_code: &str) -> Result<Option<Class>> {
        classes::get_class_by_join_code(&self.txn, join_code).await
    }

    async fn join_code_exists(&self, join_code: &str) -> Result<bool> {
        classes::join_code_exists(&self.txn, join_code).await
    }

    async fn find_class_by_teacher_and_name(
        &self,
        teacher_id: i64,
        name: &str,
        exclude_class_id: Option<i64>,
    ) -> Result<Option<Class>> {
        classes::find_class_by_teacher_and_name(&self.txn, teacher_id, name, exclude_class_id)
            .await
    }

    async fn insert_class(
        &self,
        teacher_id: i64,
        class: &CreateClassRequest,
        join_code: &str,
    ) -> Result<Class> {
        classes::insert_class(&self.txn, teacher_id, class, join_code).await
    }

    async fn update_class(&self, class_id: i64, update: &UpdateClassRequest) -> Result<Class> {
        classes::update_class(&self.txn, class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        classes::delete_class(&self.txn, class_id).await
    }

    // 选课
    async fn get_enrollment(&self, student_id: i64, class_id: i64) -> Result<Option<Enrollment>> {
        enrollments::get_enrollment(&self.txn, student_id, class_id).await
    }

    async fn insert_enrollment(&self, student_id: i64, class_id: i64) -> Result<Enrollment> {
        enrollments::insert_enrollment(&self.txn, student_id, class_id).await
    }

    async fn delete_enrollment(&self, student_id: i64, class_id: i64) -> Result<bool> {
        enrollments::delete_enrollment(&self.txn, student_id, class_id).await
    }

    // 资料
    async fn insert_material(
        &self,
        class_id: i64,
        uploaded_by: i64,
        material: &CreateMaterialRequest,
    ) -> Result<StudyMaterial> {
        materials::insert_material(&self.txn, class_id, uploaded_by, material).await
    }

    async fn get_material_by_id(&self, material_id: i64) -> Result<Option<StudyMaterial>> {
        materials::get_material_by_id(&self.txn, material_id).await
    }

    async fn delete_material(&self, material_id: i64) -> Result<bool> {
        materials::delete_material(&self.txn, material_id).await
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.txn
            .commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))
    }
}
