use super::entities::Class;
use serde::Serialize;

// 班级列表项，附带学生人数和展示用邀请码
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    #[serde(flatten)]
    pub class: Class,
    pub join_code_display: String,
    pub student_count: i64,
}

impl ClassSummary {
    pub fn new(class: Class, student_count: i64) -> Self {
        Self {
            join_code_display: class.display_join_code(),
            class,
            student_count,
        }
    }
}

// 班级中的学生
#[derive(Debug, Clone, Serialize)]
pub struct StudentInClass {
    pub id: i64,
    pub username: String,
    pub full_name: Option<String>,
    pub email: String,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

// 班级详情
#[derive(Debug, Clone, Serialize)]
pub struct ClassDetail {
    #[serde(flatten)]
    pub summary: ClassSummary,
    pub students: Vec<StudentInClass>,
}
