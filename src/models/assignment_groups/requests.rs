use serde::Deserialize;
use ts_rs::TS;

// 创建作业组请求，course_id 来自路径
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentGroupRequest {
    pub title: String,
    pub points: i32,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentGroupRequest {
    pub title: Option<String>,
    pub points: Option<i32>,
}
