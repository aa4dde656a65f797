use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::requests::{AssignmentListParams, AssignmentListQuery},
};
use crate::services::access::{AccessLevel, current_user, require_course_access};
use crate::services::assignment_groups::load_group;
use crate::services::storage_error_response;

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let mut list_query = AssignmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_id: query.course_id,
        group_id: query.group_id,
        course_ids: None,
    };

    // 作业组决定所属课程
    let scope = match list_query.group_id {
        Some(group_id) => match load_group(&storage, group_id).await {
            Ok(group) => Some(group.course_id),
            Err(resp) => return Ok(resp),
        },
        None => list_query.course_id.clone(),
    };

    match scope {
        Some(course_id) => {
            if let Err(resp) =
                require_course_access(&storage, &user, &course_id, AccessLevel::Member).await
            {
                return Ok(resp);
            }
        }
        None if user.is_admin() => {}
        None => {
            // 未指定课程时只列出自己所在课程的作业
            let courses = match storage.list_user_courses(user.id).await {
                Ok(courses) => courses,
                Err(e) => return Ok(storage_error_response(&e, ErrorCode::Conflict)),
            };
            let mut course_ids: Vec<String> = courses
                .instructor_courses
                .into_iter()
                .chain(courses.ta_courses)
                .chain(courses.student_courses)
                .map(|course| course.id)
                .collect();
            course_ids.sort();
            course_ids.dedup();
            list_query.course_ids = Some(course_ids);
        }
    }

    match storage.list_assignments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Assignment list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::Conflict)),
    }
}
