use super::entities::User;
use crate::models::common::PaginationInfo;
use crate::models::courses::responses::UserCoursesResponse;
use serde::Serialize;
use ts_rs::TS;

// 用户列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}

/// 用户详情：基本信息加上按角色划分的课程
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub user: User,
    pub courses: UserCoursesResponse,
}
