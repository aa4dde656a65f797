use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentAssignmentService, load_student_assignment, not_found, record_course_id};
use crate::models::student_assignments::requests::UpdateStudentAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessLevel, current_user, require_course_access};
use crate::services::storage_error_response;

pub async fn update_student_assignment(
    service: &StudentAssignmentService,
    request: &HttpRequest,
    student_assignment_id: i64,
    mut update_data: UpdateStudentAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let record = match load_student_assignment(&storage, student_assignment_id).await {
        Ok(record) => record,
        Err(resp) => return Ok(resp),
    };
    let course_id = match record_course_id(&storage, &record).await {
        Ok(course_id) => course_id,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) =
        require_course_access(&storage, &user, &course_id, AccessLevel::Staff).await
    {
        return Ok(resp);
    }

    update_data.grader_id = Some(user.id);

    match storage
        .update_student_assignment(student_assignment_id, update_data)
        .await
    {
        Ok(Some(record)) => {
            info!(
                "Student assignment {} graded by {}: {} points",
                record.id, user.id, record.points_earned
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                record,
                "Student assignment updated successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::Conflict)),
    }
}
