use serde::{Deserialize, Serialize};

// 学习资料，文件本身由 Web 层保存，这里只记录路径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyMaterial {
    pub id: i64,
    pub class_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub uploaded_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
