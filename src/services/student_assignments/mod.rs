pub mod check_in;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::student_assignments::entities::StudentAssignment;
use crate::models::student_assignments::requests::{
    CheckInRequest, CreateStudentAssignmentRequest, StudentAssignmentListParams,
    UpdateStudentAssignmentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::storage::Storage;

pub struct StudentAssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentAssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取学生作业记录列表
    pub async fn list_student_assignments(
        &self,
        request: &HttpRequest,
        query: StudentAssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_student_assignments(self, request, query).await
    }

    pub async fn create_student_assignment(
        &self,
        request: &HttpRequest,
        create_data: CreateStudentAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student_assignment(self, request, create_data).await
    }

    pub async fn get_student_assignment(
        &self,
        request: &HttpRequest,
        student_assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student_assignment(self, request, student_assignment_id).await
    }

    // 评分
    pub async fn update_student_assignment(
        &self,
        request: &HttpRequest,
        student_assignment_id: i64,
        update_data: UpdateStudentAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student_assignment(self, request, student_assignment_id, update_data).await
    }

    pub async fn delete_student_assignment(
        &self,
        request: &HttpRequest,
        student_assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student_assignment(self, request, student_assignment_id).await
    }

    // 扫码签到
    pub async fn check_in(
        &self,
        request: &HttpRequest,
        check_in_data: CheckInRequest,
    ) -> ActixResult<HttpResponse> {
        check_in::check_in(self, request, check_in_data).await
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::StudentAssignmentNotFound,
        "Student assignment not found",
    ))
}

// 辅助函数：加载学生作业记录，不存在时返回 404
pub(crate) async fn load_student_assignment(
    storage: &Arc<dyn Storage>,
    student_assignment_id: i64,
) -> Result<StudentAssignment, HttpResponse> {
    match storage
        .get_student_assignment_by_id(student_assignment_id)
        .await
    {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(not_found()),
        Err(e) => Err(storage_error_response(&e, ErrorCode::Conflict)),
    }
}

// 记录所属课程，记录存在则作业必然存在
pub(crate) async fn record_course_id(
    storage: &Arc<dyn Storage>,
    record: &StudentAssignment,
) -> Result<String, HttpResponse> {
    crate::services::assignments::load_assignment(storage, record.assignment_id)
        .await
        .map(|assignment| assignment.course_id)
}
