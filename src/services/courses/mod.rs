pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod members;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::entities::CourseRole;
use crate::models::courses::requests::{
    AddCourseMemberRequest, CourseMemberListParams, CourseQueryParams, CreateCourseRequest,
    UpdateCourseRequest,
};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    // 获取全部课程（管理员）
    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    // 当前用户按角色划分的课程
    pub async fn list_my_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_courses(self, request).await
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, course_data).await
    }

    // 根据课程号获取课程详情
    pub async fn get_course(
        &self,
        request: &HttpRequest,
        course_id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, request, course_id).await
    }

    // 更新课程信息
    pub async fn update_course(
        &self,
        request: &HttpRequest,
        course_id: String,
        update_data: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, course_id, update_data).await
    }

    // 删除课程
    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, course_id).await
    }

    // 列出课程成员
    pub async fn list_members(
        &self,
        request: &HttpRequest,
        course_id: String,
        query: CourseMemberListParams,
    ) -> ActixResult<HttpResponse> {
        members::list_members(self, request, course_id, query).await
    }

    // 添加课程成员
    pub async fn add_member(
        &self,
        request: &HttpRequest,
        course_id: String,
        member: AddCourseMemberRequest,
    ) -> ActixResult<HttpResponse> {
        members::add_member(self, request, course_id, member).await
    }

    // 移除课程成员
    pub async fn remove_member(
        &self,
        request: &HttpRequest,
        course_id: String,
        role: CourseRole,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        members::remove_member(self, request, course_id, role, user_id).await
    }
}
