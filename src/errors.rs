//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 领域错误（班级、选课、邀请码）与基础设施错误（数据库、配置）共用同一枚举，
//! Web 层通过 [`actix_web::ResponseError`] 映射为状态码。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_classroom_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum ClassroomError {
            $($variant(String),)*
        }

        impl ClassroomError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ClassroomError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ClassroomError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ClassroomError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ClassroomError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ClassroomError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_classroom_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Forbidden("E006", "Permission Denied"),
    DuplicateName("E007", "Duplicate Class Name"),
    ClassArchived("E008", "Class Archived"),
    AlreadyEnrolled("E009", "Already Enrolled"),
    CodeSpaceExhausted("E010", "Join Code Space Exhausted"),
    StoreConflict("E011", "Store Write Conflict"),
    UserAlreadyExists("E012", "User Already Exists"),
}

impl ClassroomError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 请求可以原样重试
    ///
    /// 写入冲突与邀请码耗尽都只说明这一次运气不好，其余错误重试也不会改变结果。
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClassroomError::StoreConflict(_) | ClassroomError::CodeSpaceExhausted(_)
        )
    }

    /// 对应的业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ClassroomError::DatabaseConfig(_)
            | ClassroomError::DatabaseConnection(_)
            | ClassroomError::DatabaseOperation(_) => ErrorCode::InternalServerError,
            ClassroomError::Validation(_) => ErrorCode::BadRequest,
            ClassroomError::NotFound(_) => ErrorCode::NotFound,
            ClassroomError::Forbidden(_) => ErrorCode::PermissionDenied,
            ClassroomError::DuplicateName(_) => ErrorCode::ClassAlreadyExists,
            ClassroomError::ClassArchived(_) => ErrorCode::ClassArchived,
            ClassroomError::AlreadyEnrolled(_) => ErrorCode::ClassAlreadyJoined,
            ClassroomError::CodeSpaceExhausted(_) => ErrorCode::JoinCodeExhausted,
            ClassroomError::StoreConflict(_) => ErrorCode::StoreConflict,
            ClassroomError::UserAlreadyExists(_) => ErrorCode::UserAlreadyExists,
        }
    }
}

impl fmt::Display for ClassroomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClassroomError {}

impl ResponseError for ClassroomError {
    fn status_code(&self) -> StatusCode {
        match self {
            ClassroomError::DatabaseConfig(_)
            | ClassroomError::DatabaseConnection(_)
            | ClassroomError::DatabaseOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ClassroomError::Validation(_) | ClassroomError::ClassArchived(_) => {
                StatusCode::BAD_REQUEST
            }
            ClassroomError::NotFound(_) => StatusCode::NOT_FOUND,
            ClassroomError::Forbidden(_) => StatusCode::FORBIDDEN,
            ClassroomError::DuplicateName(_)
            | ClassroomError::AlreadyEnrolled(_)
            | ClassroomError::StoreConflict(_)
            | ClassroomError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            ClassroomError::CodeSpaceExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // 数据库错误细节不对外暴露
        let message = match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.message().to_string(),
        };
        HttpResponse::build(self.status_code())
            .json(ApiResponse::error_empty(self.error_code(), message))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ClassroomError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClassroomError::DatabaseOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClassroomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClassroomError::database_config("test").code(), "E001");
        assert_eq!(ClassroomError::validation("test").code(), "E004");
        assert_eq!(ClassroomError::duplicate_name("test").code(), "E007");
        assert_eq!(ClassroomError::store_conflict("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ClassroomError::class_archived("test").error_type(),
            "Class Archived"
        );
        assert_eq!(
            ClassroomError::code_space_exhausted("test").error_type(),
            "Join Code Space Exhausted"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = ClassroomError::already_enrolled("Student 3 is already enrolled");
        let formatted = err.format_simple();
        assert!(formatted.contains("Already Enrolled"));
        assert!(formatted.contains("Student 3"));
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(ClassroomError::store_conflict("race").is_retryable());
        assert!(ClassroomError::code_space_exhausted("full").is_retryable());
        assert!(!ClassroomError::duplicate_name("Math").is_retryable());
        assert!(!ClassroomError::not_found("class").is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ClassroomError::duplicate_name("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ClassroomError::already_enrolled("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ClassroomError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ClassroomError::forbidden("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ClassroomError::class_archived("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ClassroomError::code_space_exhausted("x").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ClassroomError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_hides_database_details() {
        let resp = ClassroomError::database_operation("UNIQUE constraint failed").error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
