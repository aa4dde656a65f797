use super::entities::StudentAssignment;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student-assignment.ts")]
pub struct StudentAssignmentListResponse {
    pub items: Vec<StudentAssignment>,
    pub pagination: PaginationInfo,
}
