use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assignment_groups::entities::AssignmentGroup;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub course_id: String,
    pub group_id: i64,
    pub title: String,
    pub points: i16,
    pub due_date: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 形如 "CS101 Labs Lab0"
    pub fn display_name(&self, group: &AssignmentGroup) -> String {
        format!("{} {} {}", self.course_id, group.title, self.title)
    }
}
