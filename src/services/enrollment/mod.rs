//! 班级与选课服务
//!
//! 每个班级的状态：`Active ⇄ Archived`，两者都可以被删除（删除不可恢复，级联删除选课和资料）。
//! 归档的班级不再接受新的学生，已有的选课记录保留。

pub mod create_class;
pub mod delete;
pub mod join;
pub mod remove;
pub mod update;

use crate::config::{AppConfig, JoinCodeConfig};
use crate::errors::{ClassroomError, Result};
use crate::models::classes::{
    entities::Class,
    requests::{CreateClassRequest, UpdateClassRequest},
};
use crate::models::enrollments::entities::Enrollment;
use crate::services::with_conflict_retry;
use crate::storage::{Storage, StorageTx};
use crate::utils::JoinCodeGenerator;

pub struct EnrollmentService {
    generator: JoinCodeGenerator,
    max_conflict_retries: u32,
}

impl Default for EnrollmentService {
    fn default() -> Self {
        Self::new(JoinCodeConfig::default())
    }
}

impl EnrollmentService {
    pub fn new(config: JoinCodeConfig) -> Self {
        Self {
            generator: JoinCodeGenerator::new(config.max_attempts),
            max_conflict_retries: config.max_conflict_retries,
        }
    }

    /// 使用全局配置创建
    pub fn from_config() -> Self {
        Self::new(AppConfig::get().join_code)
    }

    pub(crate) fn generator(&self) -> &JoinCodeGenerator {
        &self.generator
    }

    pub(crate) fn max_conflict_retries(&self) -> u32 {
        self.max_conflict_retries
    }

    // 教师创建班级
    pub async fn create_class(
        &self,
        storage: &dyn Storage,
        teacher_id: i64,
        req: CreateClassRequest,
    ) -> Result<Class> {
        create_class::create_class(self, storage, teacher_id, req).await
    }

    // 学生通过邀请码加入班级
    pub async fn join_class(
        &self,
        storage: &dyn Storage,
        student_id: i64,
        raw_code: &str,
    ) -> Result<Enrollment> {
        with_conflict_retry(self.max_conflict_retries, "join", || {
            join::join_class(storage, student_id, raw_code)
        })
        .await
    }

    // 教师将学生移出班级
    pub async fn remove_student(
        &self,
        storage: &dyn Storage,
        teacher_id: i64,
        class_id: i64,
        student_id: i64,
    ) -> Result<()> {
        with_conflict_retry(self.max_conflict_retries, "student removal", || {
            remove::remove_student(storage, teacher_id, class_id, student_id)
        })
        .await
    }

    // 更新班级信息或归档状态
    pub async fn update_class(
        &self,
        storage: &dyn Storage,
        teacher_id: i64,
        class_id: i64,
        req: UpdateClassRequest,
    ) -> Result<Class> {
        with_conflict_retry(self.max_conflict_retries, "class update", || {
            update::update_class(storage, teacher_id, class_id, req.clone())
        })
        .await
    }

    // 删除班级
    pub async fn delete_class(
        &self,
        storage: &dyn Storage,
        teacher_id: i64,
        class_id: i64,
    ) -> Result<()> {
        with_conflict_retry(self.max_conflict_retries, "class deletion", || {
            delete::delete_class(storage, teacher_id, class_id)
        })
        .await
    }
}

/// 在事务内加载班级并校验归属
///
/// 班级不存在返回 `NotFound`，不属于该教师返回 `Forbidden`。
pub(crate) async fn require_owned_class(
    tx: &dyn StorageTx,
    teacher_id: i64,
    class_id: i64,
) -> Result<Class> {
    let class = tx
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("Class {class_id} not found")))?;

    if !class.is_owned_by(teacher_id) {
        return Err(ClassroomError::forbidden(
            "You do not have permission to manage this class",
        ));
    }

    Ok(class)
}
