use serde::{Deserialize, Serialize};

use crate::utils::join_code;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    // 班级ID
    pub id: i64,
    // 班级名称（同一教师下唯一，区分大小写）
    pub name: String,
    // 班级描述
    pub description: Option<String>,
    // 教师ID
    pub teacher_id: i64,
    // 邀请码（规范形式，如 A79BC3）
    pub join_code: String,
    // 是否已归档
    pub is_archived: bool,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Class {
    /// 展示用邀请码，如 A7-9B-C3
    pub fn display_join_code(&self) -> String {
        join_code::format(&self.join_code)
    }

    pub fn is_owned_by(&self, teacher_id: i64) -> bool {
        self.teacher_id == teacher_id
    }
}
