use super::entities::AssignmentGroup;
use crate::models::assignments::entities::Assignment;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentGroupListResponse {
    pub items: Vec<AssignmentGroup>,
}

// 作业组详情，附带组内作业（按截止时间排序）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentGroupDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub group: AssignmentGroup,
    pub assignments: Vec<Assignment>,
}
