use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 初始成员必须都是已存在的用户
    let roster = course_data
        .instructors
        .iter()
        .chain(&course_data.tas)
        .chain(&course_data.students);
    for user_id in roster {
        match storage.get_user_by_id(*user_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    format!("User {user_id} not found"),
                )));
            }
            Err(e) => return Ok(storage_error_response(&e, ErrorCode::Conflict)),
        }
    }

    match storage.create_course(course_data).await {
        Ok(course) => {
            info!("Course {} created", course.course.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::CourseAlreadyExists)),
    }
}
