use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use serde::Deserialize;

use super::assignment_groups::{create_course_group, list_course_groups};
use crate::middlewares;
use crate::models::courses::entities::CourseRole;
use crate::models::courses::requests::{
    AddCourseMemberRequest, CourseMemberListParams, CourseQueryParams, CreateCourseRequest,
    UpdateCourseRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::SafeCourseId;

// 懒加载的全局 COURSE_SERVICE 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

#[derive(Debug, Deserialize)]
pub struct MemberPath {
    pub course_id: String,
    pub role: CourseRole,
    pub user_id: i64,
}

// HTTP处理程序
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn list_my_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_my_courses(&req).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn get_course(req: HttpRequest, course_id: SafeCourseId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, course_id.0).await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeCourseId,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, course_id.0, update_data.into_inner())
        .await
}

pub async fn delete_course(
    req: HttpRequest,
    course_id: SafeCourseId,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, course_id.0).await
}

pub async fn list_members(
    req: HttpRequest,
    course_id: SafeCourseId,
    query: web::Query<CourseMemberListParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .list_members(&req, course_id.0, query.into_inner())
        .await
}

pub async fn add_member(
    req: HttpRequest,
    course_id: SafeCourseId,
    member: web::Json<AddCourseMemberRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .add_member(&req, course_id.0, member.into_inner())
        .await
}

pub async fn remove_member(
    req: HttpRequest,
    path: web::Path<MemberPath>,
) -> ActixResult<HttpResponse> {
    let path = path.into_inner();
    COURSE_SERVICE
        .remove_member(&req, path.course_id, path.role, path.user_id)
        .await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                // 创建课程与查看全部课程仅限管理员
                web::resource("")
                    .route(
                        web::get()
                            .to(list_courses)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            // 必须先于 /{course_id} 注册
            .service(web::resource("/mine").route(web::get().to(list_my_courses)))
            .service(
                web::resource("/{course_id}")
                    .route(web::get().to(get_course))
                    .route(web::put().to(update_course))
                    .route(
                        web::delete()
                            .to(delete_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{course_id}/members")
                    .route(web::get().to(list_members))
                    .route(web::post().to(add_member)),
            )
            .service(
                web::resource("/{course_id}/members/{role}/{user_id}")
                    .route(web::delete().to(remove_member)),
            )
            .service(
                web::resource("/{course_id}/assignment-groups")
                    .route(web::get().to(list_course_groups))
                    .route(web::post().to(create_course_group)),
            ),
    );
}
