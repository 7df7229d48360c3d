//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 各子模块中的查询函数对连接类型泛型，连接池和事务共用同一份实现。

mod classes;
mod enrollments;
mod materials;
mod transaction;
mod users;

pub use transaction::SeaOrmTransaction;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{ClassroomError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr, SqlErr,
    SqliteTransactionMode, TransactionOptions, TransactionTrait,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 使用指定配置连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClassroomError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory");
        }

        // 内存数据库随连接销毁，只能使用单个常驻连接
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| ClassroomError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ClassroomError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ClassroomError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 唯一约束冲突时返回数据库给出的冲突描述
///
/// 各数据库的描述中都包含冲突的列名或索引名，调用方据此区分冲突来源。
pub(crate) fn unique_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => Some(detail),
        _ => None,
    }
}

/// SQLite 写锁竞争（SQLITE_BUSY / SQLITE_LOCKED 及其扩展码）
///
/// WAL 模式下延迟事务读取后再写入，如果其他连接已先提交，会立即得到
/// SQLITE_BUSY_SNAPSHOT (517)，只能重新开启事务。
pub(crate) fn is_lock_contention(err: &DbErr) -> bool {
    let sqlx_err = match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e,
        _ => return false,
    };

    let Some(db_err) = sqlx_err.as_database_error() else {
        return false;
    };
    if db_err
        .try_downcast_ref::<sea_orm::sqlx::sqlite::SqliteError>()
        .is_none()
    {
        return false;
    }

    // 扩展码的低 8 位是主错误码
    match db_err.code() {
        Some(code) => matches!(
            code.parse::<i32>().map(|c| c & 0xff),
            Ok(SQLITE_BUSY) | Ok(SQLITE_LOCKED)
        ),
        None => false,
    }
}

const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// 把数据库错误翻译为领域错误
///
/// 写锁竞争返回 `StoreConflict`，由服务层重新执行整个事务；其余归为 `DatabaseOperation`。
pub(crate) fn db_error(context: &str, err: DbErr) -> ClassroomError {
    if is_lock_contention(&err) {
        ClassroomError::store_conflict(format!("{context}: 数据库写入冲突: {err}"))
    } else {
        ClassroomError::database_operation(format!("{context}: {err}"))
    }
}

// Storage trait 实现
use crate::models::{
    classes::entities::Class, enrollments::entities::Enrollment,
    materials::entities::StudyMaterial, users::entities::User,
    users::requests::CreateUserRequest,
};
use crate::storage::{Storage, StorageTx};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn begin(&self) -> Result<Box<dyn StorageTx>> {
        // SQLite 使用 BEGIN IMMEDIATE：开启时即取得写锁，拿不到时按 busy_timeout 等待，
        // 避免延迟事务在读后升级写锁时直接失败；其他数据库忽略该选项
        let options = TransactionOptions {
            sqlite_transaction_mode: Some(SqliteTransactionMode::Immediate),
            ..Default::default()
        };
        let txn = self
            .db
            .begin_with_options(options)
            .await
            .map_err(|e| db_error("开启事务失败", e))?;
        Ok(Box::new(SeaOrmTransaction::new(txn)))
    }

    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        users::create_user(&self.db, user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        users::get_user_by_id(&self.db, id).await
    }

    async fn count_users(&self) -> Result<u64> {
        users::count_users(&self.db).await
    }

    // 班级模块
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        classes::get_class_by_id(&self.db, class_id).await
    }

    async fn get_class_by_join_code(&self, join_code: &str) -> Result<Option<Class>> {
        classes::get_class_by_join_code(&self.db, join_code).await
    }

    async fn list_teacher_classes(
        &self,
        teacher_id: i64,
        include_archived: bool,
    ) -> Result<Vec<Class>> {
        classes::list_teacher_classes(&self.db, teacher_id, include_archived).await
    }

    async fn list_student_classes(
        &self,
        student_id: i64,
        include_archived: bool,
    ) -> Result<Vec<Class>> {
        classes::list_student_classes(&self.db, student_id, include_archived).await
    }

    async fn count_classes(&self) -> Result<u64> {
        classes::count_classes(&self.db).await
    }

    // 选课模块
    async fn get_enrollment(&self, student_id: i64, class_id: i64) -> Result<Option<Enrollment>> {
        enrollments::get_enrollment(&self.db, student_id, class_id).await
    }

    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<Enrollment>> {
        enrollments::list_student_enrollments(&self.db, student_id).await
    }

    async fn list_class_students(&self, class_id: i64) -> Result<Vec<(Enrollment, User)>> {
        enrollments::list_class_students(&self.db, class_id).await
    }

    async fn count_class_students(&self, class_id: i64) -> Result<i64> {
        enrollments::count_class_students(&self.db, class_id).await
    }

    // 资料模块
    async fn list_materials(&self, class_id: i64) -> Result<Vec<StudyMaterial>> {
        materials::list_materials(&self.db, class_id).await
    }
}
