use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentGroup {
    pub id: i64,
    pub course_id: String,
    pub title: String,
    pub points: i16,
}

// 形如 "CS101: Labs"
impl std::fmt::Display for AssignmentGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.course_id, self.title)
    }
}
