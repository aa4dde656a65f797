use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::student_assignments::requests::{
    CheckInRequest, CreateStudentAssignmentRequest, StudentAssignmentListParams,
    UpdateStudentAssignmentRequest,
};
use crate::services::StudentAssignmentService;
use crate::utils::SafeStudentAssignmentIdI64;

// 懒加载的全局 STUDENT_ASSIGNMENT_SERVICE 实例
static STUDENT_ASSIGNMENT_SERVICE: Lazy<StudentAssignmentService> =
    Lazy::new(StudentAssignmentService::new_lazy);

// HTTP处理程序
pub async fn list_student_assignments(
    req: HttpRequest,
    query: web::Query<StudentAssignmentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_ASSIGNMENT_SERVICE
        .list_student_assignments(&req, query.into_inner())
        .await
}

pub async fn create_student_assignment(
    req: HttpRequest,
    create_data: web::Json<CreateStudentAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_ASSIGNMENT_SERVICE
        .create_student_assignment(&req, create_data.into_inner())
        .await
}

pub async fn get_student_assignment(
    req: HttpRequest,
    student_assignment_id: SafeStudentAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_ASSIGNMENT_SERVICE
        .get_student_assignment(&req, student_assignment_id.0)
        .await
}

pub async fn update_student_assignment(
    req: HttpRequest,
    student_assignment_id: SafeStudentAssignmentIdI64,
    update_data: web::Json<UpdateStudentAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_ASSIGNMENT_SERVICE
        .update_student_assignment(&req, student_assignment_id.0, update_data.into_inner())
        .await
}

pub async fn delete_student_assignment(
    req: HttpRequest,
    student_assignment_id: SafeStudentAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_ASSIGNMENT_SERVICE
        .delete_student_assignment(&req, student_assignment_id.0)
        .await
}

pub async fn check_in(
    req: HttpRequest,
    check_in_data: web::Json<CheckInRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_ASSIGNMENT_SERVICE
        .check_in(&req, check_in_data.into_inner())
        .await
}

// 配置路由
pub fn configure_student_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student-assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_student_assignments))
                    .route(web::post().to(create_student_assignment)),
            )
            // 必须先于 /{student_assignment_id} 注册
            .service(web::resource("/check-in").route(web::post().to(check_in)))
            .service(
                web::resource("/{student_assignment_id}")
                    .route(web::get().to(get_student_assignment))
                    .route(web::put().to(update_student_assignment))
                    .route(web::delete().to(delete_student_assignment)),
            ),
    );
}
