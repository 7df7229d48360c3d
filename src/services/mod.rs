//! 业务服务层
//!
//! 每个操作显式接收存储句柄，写操作各自在一个事务内完成。

pub mod classes;
pub mod enrollment;
pub mod materials;

pub use enrollment::EnrollmentService;

use std::future::Future;

use tracing::warn;

use crate::errors::{ClassroomError, Result};
use crate::models::users::entities::User;
use crate::storage::StorageTx;

/// 没有单独配置时写操作遇到存储冲突的重试次数
pub(crate) const DEFAULT_CONFLICT_RETRIES: u32 = 3;

/// 在事务内加载当前操作者，不存在时返回 `NotFound`
pub(crate) async fn require_user(tx: &dyn StorageTx, user_id: i64) -> Result<User> {
    tx.get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("User {user_id} not found")))
}

/// 遇到 `StoreConflict` 时重新执行整个事务
///
/// 冲突来自并发写入（邀请码被占用、数据库写锁竞争），每次重试都开启新事务，
/// 能看到其他请求已经提交的数据。超过 `max_retries` 次后原样返回冲突。
pub(crate) async fn with_conflict_retry<T, F, Fut>(
    max_retries: u32,
    operation: &str,
    mut attempt: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut conflicts = 0;
    loop {
        match attempt().await {
            Err(ClassroomError::StoreConflict(msg)) if conflicts < max_retries => {
                conflicts += 1;
                warn!(
                    "Store conflict during {} (retry {}/{}): {}",
                    operation, conflicts, max_retries, msg
                );
                tokio::task::yield_now().await;
            }
            result => return result,
        }
    }
}
