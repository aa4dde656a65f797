use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentAssignmentService;
use crate::models::{
    ApiResponse, ErrorCode,
    student_assignments::requests::{StudentAssignmentListParams, StudentAssignmentListQuery},
};
use crate::services::access::{AccessLevel, current_user, require_course_access};
use crate::services::assignments::load_assignment;
use crate::services::storage_error_response;

fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::CoursePermissionDenied,
        "You can only view your own student assignments",
    ))
}

pub async fn list_student_assignments(
    service: &StudentAssignmentService,
    request: &HttpRequest,
    query: StudentAssignmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let mut list_query = StudentAssignmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        assignment_id: query.assignment_id,
        student_id: query.student_id,
        course_id: query.course_id,
    };

    if !user.is_admin() {
        // 作业优先决定课程上下文
        let scope = match list_query.assignment_id {
            Some(assignment_id) => match load_assignment(&storage, assignment_id).await {
                Ok(assignment) => Some(assignment.course_id),
                Err(resp) => return Ok(resp),
            },
            None => list_query.course_id.clone(),
        };

        let is_staff = match scope {
            Some(course_id) => {
                match require_course_access(&storage, &user, &course_id, AccessLevel::Member).await
                {
                    Ok(access) => access.is_staff(),
                    Err(resp) => return Ok(resp),
                }
            }
            None => false,
        };

        // 学生只能看到自己的记录
        if !is_staff {
            match list_query.student_id {
                Some(student_id) if student_id != user.id => return Ok(forbidden()),
                _ => list_query.student_id = Some(user.id),
            }
        }
    }

    match storage
        .list_student_assignments_with_pagination(list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Student assignment list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::Conflict)),
    }
}
