use std::sync::Arc;

use crate::models::{
    assignment_groups::{
        entities::AssignmentGroup,
        requests::{CreateAssignmentGroupRequest, UpdateAssignmentGroupRequest},
    },
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    courses::{
        entities::{Course, CourseDetail, CourseMember, CourseRole},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::{CourseListResponse, UserCoursesResponse},
    },
    student_assignments::{
        entities::StudentAssignment,
        requests::{
            CreateStudentAssignmentRequest, StudentAssignmentListQuery,
            UpdateStudentAssignmentRequest,
        },
        responses::StudentAssignmentListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段须为已哈希的值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程及其初始成员
    async fn create_course(&self, course: CreateCourseRequest) -> Result<CourseDetail>;
    // 通过课程号获取课程
    async fn get_course_by_id(&self, course_id: &str) -> Result<Option<Course>>;
    // 获取课程及成员
    async fn get_course_detail(&self, course_id: &str) -> Result<Option<CourseDetail>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程信息
    async fn update_course(
        &self,
        course_id: &str,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程（级联删除作业组、作业与学生作业记录）
    async fn delete_course(&self, course_id: &str) -> Result<bool>;
    // 用户按角色划分的课程
    async fn list_user_courses(&self, user_id: i64) -> Result<UserCoursesResponse>;

    /// 课程成员方法
    async fn add_course_member(
        &self,
        course_id: &str,
        user_id: i64,
        role: CourseRole,
    ) -> Result<CourseMember>;
    async fn remove_course_member(
        &self,
        course_id: &str,
        user_id: i64,
        role: CourseRole,
    ) -> Result<bool>;
    async fn list_course_members(
        &self,
        course_id: &str,
        role: Option<CourseRole>,
    ) -> Result<Vec<CourseMember>>;
    // 用户在课程中的全部角色
    async fn get_user_course_roles(&self, course_id: &str, user_id: i64)
    -> Result<Vec<CourseRole>>;

    /// 作业组方法
    async fn create_assignment_group(
        &self,
        course_id: &str,
        group: CreateAssignmentGroupRequest,
    ) -> Result<AssignmentGroup>;
    async fn get_assignment_group_by_id(&self, group_id: i64) -> Result<Option<AssignmentGroup>>;
    // 按分值、标题排序
    async fn list_course_assignment_groups(&self, course_id: &str)
    -> Result<Vec<AssignmentGroup>>;
    async fn update_assignment_group(
        &self,
        group_id: i64,
        update: UpdateAssignmentGroupRequest,
    ) -> Result<Option<AssignmentGroup>>;
    async fn delete_assignment_group(&self, group_id: i64) -> Result<bool>;

    /// 作业方法
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 按截止时间、分值、标题排序
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    async fn list_group_assignments(&self, group_id: i64) -> Result<Vec<Assignment>>;
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;

    /// 学生作业记录方法
    async fn create_student_assignment(
        &self,
        record: CreateStudentAssignmentRequest,
    ) -> Result<StudentAssignment>;
    async fn get_student_assignment_by_id(&self, id: i64) -> Result<Option<StudentAssignment>>;
    async fn get_student_assignment_by_qr_code(
        &self,
        qr_code: &str,
    ) -> Result<Option<StudentAssignment>>;
    // 按所属作业的截止时间、分值、标题排序
    async fn list_student_assignments_with_pagination(
        &self,
        query: StudentAssignmentListQuery,
    ) -> Result<StudentAssignmentListResponse>;
    async fn update_student_assignment(
        &self,
        id: i64,
        update: UpdateStudentAssignmentRequest,
    ) -> Result<Option<StudentAssignment>>;
    // 扫码签到：标记完成并记录操作人
    async fn check_in_student_assignment(
        &self,
        qr_code: &str,
        grader_id: i64,
    ) -> Result<Option<StudentAssignment>>;
    async fn delete_student_assignment(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
