//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use sea_orm::{DbErr, SqlErr};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_course_manager_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum CourseManagerError {
            $($variant(String),)*
        }

        impl CourseManagerError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CourseManagerError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CourseManagerError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CourseManagerError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CourseManagerError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CourseManagerError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_course_manager_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Constraint Conflict"),
    Authentication("E007", "Authentication Error"),
    Authorization("E008", "Authorization Error"),
}

impl CourseManagerError {
    /// 将数据库错误按约束类型归类
    ///
    /// 唯一约束冲突归为 `Conflict`，外键约束归为 `Validation`，其余为 `DatabaseOperation`。
    pub fn from_db_err(context: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                CourseManagerError::conflict(format!("{context}: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                CourseManagerError::validation(format!("{context}: {detail}"))
            }
            _ => CourseManagerError::database_operation(format!("{context}: {err}")),
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CourseManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CourseManagerError {}

// 为常见的错误类型实现 From trait
impl From<DbErr> for CourseManagerError {
    fn from(err: DbErr) -> Self {
        CourseManagerError::from_db_err("Database operation failed", err)
    }
}

pub type Result<T> = std::result::Result<T, CourseManagerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CourseManagerError::database_config("test").code(), "E001");
        assert_eq!(CourseManagerError::validation("test").code(), "E004");
        assert_eq!(CourseManagerError::conflict("test").code(), "E006");
        assert_eq!(CourseManagerError::authorization("test").code(), "E008");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CourseManagerError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            CourseManagerError::conflict("test").error_type(),
            "Constraint Conflict"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CourseManagerError::validation("points out of range");
        assert_eq!(err.message(), "points out of range");
    }

    #[test]
    fn test_format_simple() {
        let err = CourseManagerError::conflict("duplicate title");
        let formatted = err.format_simple();
        assert!(formatted.contains("Constraint Conflict"));
        assert!(formatted.contains("duplicate title"));
    }

    #[test]
    fn test_unclassified_db_err_is_operation_error() {
        let err = CourseManagerError::from_db_err("查询课程失败", DbErr::Custom("boom".into()));
        assert_eq!(err.code(), "E003");
        assert!(err.message().starts_with("查询课程失败"));
    }
}
