use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::responses::UserDetail;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

// 管理员查看用户及其所在课程
pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, ErrorCode::Conflict)),
    };

    match storage.list_user_courses(user.id).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserDetail { user, courses },
            "User information retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::Conflict)),
    }
}
