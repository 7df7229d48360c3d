use tracing::info;

use super::require_owned_class;
use crate::errors::{ClassroomError, Result};
use crate::storage::Storage;

pub async fn remove_student(
    storage: &dyn Storage,
    teacher_id: i64,
    class_id: i64,
    student_id: i64,
) -> Result<()> {
    let tx = storage.begin().await?;

    require_owned_class(&*tx, teacher_id, class_id).await?;

    if !tx.delete_enrollment(student_id, class_id).await? {
        return Err(ClassroomError::not_found(
            "Student is not enrolled in this class",
        ));
    }

    tx.commit().await?;

    info!(
        "Student {} removed from class {} by teacher {}",
        student_id, class_id, teacher_id
    );
    Ok(())
}
