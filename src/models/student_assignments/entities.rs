use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assignments::entities::Assignment;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student-assignment.ts")]
pub struct StudentAssignment {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub qr_code: String,
    pub completed: bool,
    pub points_earned: i16,
    // 最后修改时间，每次写入自动刷新
    pub timestamp: chrono::DateTime<chrono::Utc>,
    // None 表示尚未评分
    pub grader_id: Option<i64>,
    pub comment: String,
}

impl StudentAssignment {
    pub fn is_graded(&self) -> bool {
        self.grader_id.is_some()
    }

    /// 记录以所属作业的标题展示；传入的不是所属作业时返回 `None`
    pub fn display_name(&self, assignment: &Assignment) -> Option<String> {
        (assignment.id == self.assignment_id).then(|| assignment.title.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn assignment(id: i64, title: &str) -> Assignment {
        Assignment {
            id,
            course_id: "CS101".to_string(),
            group_id: 1,
            title: title.to_string(),
            points: 10,
            due_date: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_uses_own_assignment() {
        let record = StudentAssignment {
            id: 1,
            assignment_id: 7,
            student_id: 3,
            qr_code: "abc".to_string(),
            completed: false,
            points_earned: 0,
            timestamp: Utc::now(),
            grader_id: None,
            comment: String::new(),
        };

        assert_eq!(
            record.display_name(&assignment(7, "Lab0")).as_deref(),
            Some("Lab0")
        );
        assert_eq!(record.display_name(&assignment(8, "Lab1")), None);
    }
}
