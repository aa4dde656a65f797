use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentAssignmentService, load_student_assignment, record_course_id};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessLevel, current_user, require_course_access};

pub async fn get_student_assignment(
    service: &StudentAssignmentService,
    request: &HttpRequest,
    student_assignment_id: i64,
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

    // 本人可直接查看
    if record.student_id != user.id {
        let course_id = match record_course_id(&storage, &record).await {
            Ok(course_id) => course_id,
            Err(resp) => return Ok(resp),
        };
        match require_course_access(&storage, &user, &course_id, AccessLevel::Member).await {
            Ok(access) if access.is_staff() => {}
            Ok(_) => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::CoursePermissionDenied,
                    "You can only view your own student assignments",
                )));
            }
            Err(resp) => return Ok(resp),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        record,
        "Student assignment retrieved successfully",
    )))
}
