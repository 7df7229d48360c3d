use serde::Deserialize;

// 创建班级请求
//
// 教师 ID 来自当前登录用户，不在请求体中指定。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub description: Option<String>,
}

// 更新班级请求
//
// 各字段相互独立，None 表示不修改。is_archived 可以双向切换。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_archived: Option<bool>,
}

impl UpdateClassRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_archived.is_none()
    }
}
