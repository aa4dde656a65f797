use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::models::{ApiResponse, ErrorCode, auth::UserInfoResponse};
use crate::services::access::current_user;
use crate::services::storage_error_response;

pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    match storage.list_user_courses(user.id).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user, courses },
            "User information retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::Conflict)),
    }
}
