use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

/// 创建学生作业记录请求
///
/// qr_code 缺省时自动生成；points_earned 缺省为 0
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student-assignment.ts")]
pub struct CreateStudentAssignmentRequest {
    pub assignment_id: i64,
    pub student_id: i64,
    pub qr_code: Option<String>,
    pub completed: Option<bool>,
    pub points_earned: Option<i32>,
    pub comment: Option<String>,
    // 创建时即给分则由服务层填入评分人
    #[serde(skip)]
    #[ts(skip)]
    pub grader_id: Option<i64>,
}

/// 更新（评分）请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student-assignment.ts")]
pub struct UpdateStudentAssignmentRequest {
    pub completed: Option<bool>,
    pub points_earned: Option<i32>,
    pub comment: Option<String>,
    // 由服务层填入当前评分人
    #[serde(skip)]
    #[ts(skip)]
    pub grader_id: Option<i64>,
}

/// 二维码签到请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student-assignment.ts")]
pub struct CheckInRequest {
    pub qr_code: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student-assignment.ts")]
pub struct StudentAssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
    pub course_id: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct StudentAssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
    pub course_id: Option<String>,
}
