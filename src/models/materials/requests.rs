use serde::Deserialize;

// 上传学习资料请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaterialRequest {
    pub title: String,
    pub description: Option<String>,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
}
