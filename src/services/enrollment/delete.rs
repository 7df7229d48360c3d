use tracing::info;

use super::require_owned_class;
use crate::errors::{ClassroomError, Result};
use crate::storage::Storage;

/// 删除班级，选课记录和资料在同一事务内一并删除
pub async fn delete_class(storage: &dyn Storage, teacher_id: i64, class_id: i64) -> Result<()> {
    let tx = storage.begin().await?;

    let class = require_owned_class(&*tx, teacher_id, class_id).await?;

    if !tx.delete_class(class_id).await? {
        return Err(ClassroomError::not_found(format!(
            "Class {class_id} not found"
        )));
    }

    tx.commit().await?;

    info!(
        "Class '{}' ({}) deleted by teacher {}",
        class.name, class_id, teacher_id
    );
    Ok(())
}
