use serde::{Deserialize, Serialize};

// 业务错误码，随 ApiResponse 一起返回给前端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    PermissionDenied = 1003,
    NotFound = 1004,
    InternalServerError = 1005,

    // 用户相关
    UserAlreadyExists = 2001,

    // 班级相关
    ClassAlreadyExists = 3001,
    ClassArchived = 3002,
    ClassAlreadyJoined = 3003,
    JoinCodeExhausted = 3004,
    StoreConflict = 3005,
}
