use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignment_groups::requests::{
    CreateAssignmentGroupRequest, UpdateAssignmentGroupRequest,
};
use crate::services::AssignmentGroupService;
use crate::utils::{SafeAssignmentGroupIdI64, SafeCourseId};

// 懒加载的全局 ASSIGNMENT_GROUP_SERVICE 实例
static ASSIGNMENT_GROUP_SERVICE: Lazy<AssignmentGroupService> =
    Lazy::new(AssignmentGroupService::new_lazy);

// 挂载在 /api/v1/courses/{course_id}/assignment-groups 下
pub async fn list_course_groups(
    req: HttpRequest,
    course_id: SafeCourseId,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_GROUP_SERVICE
        .list_course_groups(&req, course_id.0)
        .await
}

pub async fn create_course_group(
    req: HttpRequest,
    course_id: SafeCourseId,
    group_data: web::Json<CreateAssignmentGroupRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_GROUP_SERVICE
        .create_group(&req, course_id.0, group_data.into_inner())
        .await
}

pub async fn get_group(
    req: HttpRequest,
    group_id: SafeAssignmentGroupIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_GROUP_SERVICE.get_group(&req, group_id.0).await
}

pub async fn update_group(
    req: HttpRequest,
    group_id: SafeAssignmentGroupIdI64,
    update_data: web::Json<UpdateAssignmentGroupRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_GROUP_SERVICE
        .update_group(&req, group_id.0, update_data.into_inner())
        .await
}

pub async fn delete_group(
    req: HttpRequest,
    group_id: SafeAssignmentGroupIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_GROUP_SERVICE.delete_group(&req, group_id.0).await
}

// 配置路由
pub fn configure_assignment_group_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignment-groups")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{group_id}")
                    .route(web::get().to(get_group))
                    .route(web::put().to(update_group))
                    .route(web::delete().to(delete_group)),
            ),
    );
}
