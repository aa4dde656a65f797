pub mod access;
pub mod assignment_groups;
pub mod assignments;
pub mod auth;
pub mod courses;
pub mod student_assignments;
pub mod users;

pub use assignment_groups::AssignmentGroupService;
pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use student_assignments::StudentAssignmentService;
pub use users::UserService;

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::CourseManagerError;
use crate::models::{ApiResponse, ErrorCode};

/// 将存储层错误转换为 HTTP 响应
///
/// `conflict_code` 为该资源的唯一约束冲突错误码。
pub(crate) fn storage_error_response(
    err: &CourseManagerError,
    conflict_code: ErrorCode,
) -> HttpResponse {
    match err {
        CourseManagerError::Validation(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg.as_str())),
        CourseManagerError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(conflict_code, msg.as_str()))
        }
        CourseManagerError::NotFound(msg) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, msg.as_str())),
        CourseManagerError::Authentication(msg) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, msg.as_str())),
        CourseManagerError::Authorization(msg) => HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, msg.as_str())),
        _ => {
            error!("{}", err);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                err.format_simple(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_storage_errors_map_to_status_codes() {
        let cases = [
            (CourseManagerError::validation("bad"), StatusCode::BAD_REQUEST),
            (CourseManagerError::conflict("dup"), StatusCode::CONFLICT),
            (CourseManagerError::not_found("gone"), StatusCode::NOT_FOUND),
            (CourseManagerError::authorization("no"), StatusCode::FORBIDDEN),
            (
                CourseManagerError::database_operation("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(
                storage_error_response(&err, ErrorCode::Conflict).status(),
                status
            );
        }
    }
}
