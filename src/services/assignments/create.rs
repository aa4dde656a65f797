use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessLevel, current_user, require_course_access};
use crate::services::storage_error_response;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = require_course_access(
        &storage,
        &user,
        &assignment_data.course_id,
        AccessLevel::Manage,
    )
    .await
    {
        return Ok(resp);
    }

    match storage.create_assignment(assignment_data).await {
        Ok(assignment) => {
            info!(
                "Assignment {} ({}) created by {}",
                assignment.id, assignment.title, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::AssignmentAlreadyExists)),
    }
}
