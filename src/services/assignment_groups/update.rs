use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentGroupService, load_group};
use crate::models::assignment_groups::requests::UpdateAssignmentGroupRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessLevel, current_user, require_course_access};
use crate::services::storage_error_response;

pub async fn update_group(
    service: &AssignmentGroupService,
    request: &HttpRequest,
    group_id: i64,
    update_data: UpdateAssignmentGroupRequest,
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
        require_course_access(&storage, &user, &group.course_id, AccessLevel::Manage).await
    {
        return Ok(resp);
    }

    match storage.update_assignment_group(group_id, update_data).await {
        Ok(Some(group)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            group,
            "Assignment group updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentGroupNotFound,
            "Assignment group not found",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::AssignmentGroupAlreadyExists,
        )),
    }
}
