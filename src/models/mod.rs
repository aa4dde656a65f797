//! 业务数据模型
//!
//! 按资源划分为 entities（业务实体）、requests（请求参数）与 responses（响应结构）。

pub mod assignment_groups;
pub mod assignments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod student_assignments;
pub mod users;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间，用于启动耗时统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1005,
    InternalServerError = 1099,

    // 认证与用户
    AuthFailed = 2000,
    UserNotFound = 2001,
    UserAlreadyExists = 2002,
    UserCannotDeleteSelf = 2003,

    // 课程
    CourseNotFound = 3000,
    CourseAlreadyExists = 3001,
    CoursePermissionDenied = 3002,
    CourseMemberNotFound = 3003,
    CourseMemberAlreadyExists = 3004,

    // 作业组与作业
    AssignmentGroupNotFound = 4000,
    AssignmentGroupAlreadyExists = 4001,
    AssignmentNotFound = 4100,
    AssignmentAlreadyExists = 4101,

    // 学生作业记录
    StudentAssignmentNotFound = 5000,
    StudentAssignmentAlreadyExists = 5001,
}
