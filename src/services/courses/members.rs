use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::courses::entities::CourseRole;
use crate::models::courses::requests::{AddCourseMemberRequest, CourseMemberListParams};
use crate::models::courses::responses::CourseMemberListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessLevel, current_user, require_course_access};
use crate::services::storage_error_response;

pub async fn list_members(
    service: &CourseService,
    request: &HttpRequest,
    course_id: String,
    query: CourseMemberListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) =
        require_course_access(&storage, &user, &course_id, AccessLevel::Member).await
    {
        return Ok(resp);
    }

    match storage.list_course_members(&course_id, query.role).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseMemberListResponse { items },
            "Course members retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn add_member(
    service: &CourseService,
    request: &HttpRequest,
    course_id: String,
    member: AddCourseMemberRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) =
        require_course_access(&storage, &user, &course_id, AccessLevel::Manage).await
    {
        return Ok(resp);
    }

    match storage.get_user_by_id(member.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, ErrorCode::Conflict)),
    }

    match storage
        .add_course_member(&course_id, member.user_id, member.role)
        .await
    {
        Ok(created) => {
            info!(
                "User {} added to course {} as {}",
                created.user_id, course_id, created.role
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(created, "Course member added successfully")))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::CourseMemberAlreadyExists,
        )),
    }
}

pub async fn remove_member(
    service: &CourseService,
    request: &HttpRequest,
    course_id: String,
    role: CourseRole,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) =
        require_course_access(&storage, &user, &course_id, AccessLevel::Manage).await
    {
        return Ok(resp);
    }

    match storage.remove_course_member(&course_id, user_id, role).await {
        Ok(true) => {
            info!("User {} removed from course {} ({})", user_id, course_id, role);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Course member removed successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseMemberNotFound,
            "Course member not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::Conflict)),
    }
}
