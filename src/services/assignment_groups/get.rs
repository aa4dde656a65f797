use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentGroupService, load_group};
use crate::models::assignment_groups::responses::{
    AssignmentGroupDetail, AssignmentGroupListResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessLevel, current_user, require_course_access};
use crate::services::storage_error_response;

pub async fn list_course_groups(
    service: &AssignmentGroupService,
    request: &HttpRequest,
    course_id: String,
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

    match storage.list_course_assignment_groups(&course_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssignmentGroupListResponse { items },
            "Assignment groups retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn get_group(
    service: &AssignmentGroupService,
    request: &HttpRequest,
    group_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let group = match load_group(&storage, group_id).await {
        Ok(group) => group,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) =
        require_course_access(&storage, &user, &group.course_id, AccessLevel::Member).await
    {
        return Ok(resp);
    }

    match storage.list_group_assignments(group_id).await {
        Ok(assignments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssignmentGroupDetail { group, assignments },
            "Assignment group retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::Conflict)),
    }
}
