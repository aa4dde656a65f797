use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentAssignmentService, not_found};
use crate::models::student_assignments::requests::CheckInRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessLevel, current_user, require_course_access};
use crate::services::assignments::load_assignment;
use crate::services::storage_error_response;

/// 助教扫描学生二维码，标记完成并记录评分人
pub async fn check_in(
    service: &StudentAssignmentService,
    request: &HttpRequest,
    check_in_data: CheckInRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let qr_code = check_in_data.qr_code.trim();
    let record = match storage.get_student_assignment_by_qr_code(qr_code).await {
        Ok(Some(record)) => record,
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(storage_error_response(&e, ErrorCode::Conflict)),
    };
    let assignment = match load_assignment(&storage, record.assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) =
        require_course_access(&storage, &user, &assignment.course_id, AccessLevel::Staff).await
    {
        return Ok(resp);
    }

    match storage.check_in_student_assignment(qr_code, user.id).await {
        Ok(Some(record)) => {
            info!(
                "Student {} checked in for {} by {}",
                record.student_id,
                record
                    .display_name(&assignment)
                    .unwrap_or_else(|| assignment.title.clone()),
                user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                record,
                "Check-in recorded successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::Conflict)),
    }
}
