pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignment_groups::entities::AssignmentGroup;
use crate::models::assignment_groups::requests::{
    CreateAssignmentGroupRequest, UpdateAssignmentGroupRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::storage::Storage;

pub struct AssignmentGroupService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentGroupService {
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

    // 列出课程下的作业组
    pub async fn list_course_groups(
        &self,
        request: &HttpRequest,
        course_id: String,
    ) -> ActixResult<HttpResponse> {
        get::list_course_groups(self, request, course_id).await
    }

    pub async fn create_group(
        &self,
        request: &HttpRequest,
        course_id: String,
        group_data: CreateAssignmentGroupRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_group(self, request, course_id, group_data).await
    }

    // 作业组详情（含组内作业）
    pub async fn get_group(&self, request: &HttpRequest, group_id: i64) -> ActixResult<HttpResponse> {
        get::get_group(self, request, group_id).await
    }

    pub async fn update_group(
        &self,
        request: &HttpRequest,
        group_id: i64,
        update_data: UpdateAssignmentGroupRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_group(self, request, group_id, update_data).await
    }

    pub async fn delete_group(
        &self,
        request: &HttpRequest,
        group_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_group(self, request, group_id).await
    }
}

// 辅助函数：加载作业组，不存在时返回 404
pub(crate) async fn load_group(
    storage: &Arc<dyn Storage>,
    group_id: i64,
) -> Result<AssignmentGroup, HttpResponse> {
    match storage.get_assignment_group_by_id(group_id).await {
        Ok(Some(group)) => Ok(group),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentGroupNotFound,
            "Assignment group not found",
        ))),
        Err(e) => Err(storage_error_response(&e, ErrorCode::Conflict)),
    }
}
