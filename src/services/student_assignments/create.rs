use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentAssignmentService;
use crate::models::student_assignments::requests::CreateStudentAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessLevel, current_user, require_course_access};
use crate::services::assignments::load_assignment;
use crate::services::storage_error_response;

pub async fn create_student_assignment(
    service: &StudentAssignmentService,
    request: &HttpRequest,
    mut create_data: CreateStudentAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let assignment = match load_assignment(&storage, create_data.assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) =
        require_course_access(&storage, &user, &assignment.course_id, AccessLevel::Staff).await
    {
        return Ok(resp);
    }

    // 创建时带分数或评语视为已评分
    if create_data.points_earned.is_some() || create_data.comment.is_some() {
        create_data.grader_id = Some(user.id);
    }

    match storage.create_student_assignment(create_data).await {
        Ok(record) => {
            info!(
                "Student assignment {} created for student {} on assignment {}",
                record.id, record.student_id, record.assignment_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                record,
                "Student assignment created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::StudentAssignmentAlreadyExists,
        )),
    }
}
