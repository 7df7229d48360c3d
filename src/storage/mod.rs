//! 数据存储层
//!
//! `Storage` 提供连接池级别的只读查询和事务入口；所有写操作都在 `StorageTx` 中完成，
//! 每个业务操作对应一个事务。事务对象被丢弃而未提交时自动回滚。
//!
//! 唯一约束冲突在这一层被翻译为领域错误：
//! - 邀请码冲突 -> `StoreConflict`
//! - 同一教师下班级重名 -> `DuplicateName`
//! - 重复选课 -> `AlreadyEnrolled`

use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::{
    classes::{
        entities::Class,
        requests::{CreateClassRequest, UpdateClassRequest},
    },
    enrollments::entities::Enrollment,
    materials::{entities::StudyMaterial, requests::CreateMaterialRequest},
    users::{entities::User, requests::CreateUserRequest},
};

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 开启一个事务
    async fn begin(&self) -> Result<Box<dyn StorageTx>>;

    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 班级查询方法
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 通过邀请码（规范形式）获取班级信息
    async fn get_class_by_join_code(&self, join_code: &str) -> Result<Option<Class>>;
    // 列出教师创建的班级，按创建时间倒序
    async fn list_teacher_classes(
        &self,
        teacher_id: i64,
        include_archived: bool,
    ) -> Result<Vec<Class>>;
    // 列出学生加入的班级，按创建时间倒序
    async fn list_student_classes(
        &self,
        student_id: i64,
        include_archived: bool,
    ) -> Result<Vec<Class>>;
    // 班级总数
    async fn count_classes(&self) -> Result<u64>;

    /// 选课查询方法
    // 获取学生在班级中的选课记录
    async fn get_enrollment(&self, student_id: i64, class_id: i64) -> Result<Option<Enrollment>>;
    // 列出学生的全部选课记录，按加入时间排序
    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<Enrollment>>;
    // 列出班级中的学生及其选课记录，按加入时间排序
    async fn list_class_students(&self, class_id: i64) -> Result<Vec<(Enrollment, User)>>;
    // 班级学生人数
    async fn count_class_students(&self, class_id: i64) -> Result<i64>;

    /// 学习资料查询方法
    // 列出班级资料，按上传时间倒序
    async fn list_materials(&self, class_id: i64) -> Result<Vec<StudyMaterial>>;
}

/// 事务内的存储操作
#[async_trait::async_trait]
pub trait StorageTx: Send + Sync {
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 通过邀请码（规范形式）获取班级信息
    async fn get_class_by_join_code(&self, join_code: &str) -> Result<Option<Class>>;
    // 邀请码是否已被占用（不区分大小写）
    async fn join_code_exists(&self, join_code: &str) -> Result<bool>;
    // 按教师和班级名查找（精确匹配），可排除指定班级
    async fn find_class_by_teacher_and_name(
        &self,
        teacher_id: i64,
        name: &str,
        exclude_class_id: Option<i64>,
    ) -> Result<Option<Class>>;
    // 插入班级
    async fn insert_class(
        &self,
        teacher_id: i64,
        class: &CreateClassRequest,
        join_code: &str,
    ) -> Result<Class>;
    // 更新班级
    async fn update_class(&self, class_id: i64, update: &UpdateClassRequest) -> Result<Class>;
    // 删除班级及其选课记录和资料
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    // 获取学生在班级中的选课记录
    async fn get_enrollment(&self, student_id: i64, class_id: i64) -> Result<Option<Enrollment>>;
    // 插入选课记录
    async fn insert_enrollment(&self, student_id: i64, class_id: i64) -> Result<Enrollment>;
    // 删除选课记录
    async fn delete_enrollment(&self, student_id: i64, class_id: i64) -> Result<bool>;

    // 插入学习资料
    async fn insert_material(
        &self,
        class_id: i64,
        uploaded_by: i64,
        material: &CreateMaterialRequest,
    ) -> Result<StudyMaterial>;
    // 通过ID获取学习资料
    async fn get_material_by_id(&self, material_id: i64) -> Result<Option<StudyMaterial>>;
    // 删除学习资料
    async fn delete_material(&self, material_id: i64) -> Result<bool>;

    /// 提交事务
    async fn commit(self: Box<Self>) -> Result<()>;
}

/// 使用全局配置创建存储
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

/// 使用指定的数据库配置创建存储
pub async fn create_storage_with(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
