use super::entities::{Course, CourseMember};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 课程列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Course>,
}

// 当前用户按角色划分的课程
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UserCoursesResponse {
    pub instructor_courses: Vec<Course>,
    pub ta_courses: Vec<Course>,
    pub student_courses: Vec<Course>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseMemberListResponse {
    pub items: Vec<CourseMember>,
}
