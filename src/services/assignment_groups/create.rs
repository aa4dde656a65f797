use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentGroupService;
use crate::models::assignment_groups::requests::CreateAssignmentGroupRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessLevel, current_user, require_course_access};
use crate::services::storage_error_response;

pub async fn create_group(
    service: &AssignmentGroupService,
    request: &HttpRequest,
    course_id: String,
    group_data: CreateAssignmentGroupRequest,
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

    match storage.create_assignment_group(&course_id, group_data).await {
        Ok(group) => {
            info!("Assignment group {} created by {}", group, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                group,
                "Assignment group created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::AssignmentGroupAlreadyExists,
        )),
    }
}
