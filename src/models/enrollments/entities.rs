use serde::{Deserialize, Serialize};

// 选课记录：一个学生与一个班级的关联
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}
