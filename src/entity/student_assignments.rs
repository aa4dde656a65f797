//! 学生作业记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    #[sea_orm(unique)]
    pub qr_code: String,
    pub completed: bool,
    pub points_earned: i16,
    pub timestamp: i64,
    pub grader_id: Option<i64>,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id",
        on_delete = "Cascade"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::GraderId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    Grader,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

// 评分人关系通过 Relation::Grader 显式 join
impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_student_assignment(
        self,
    ) -> crate::models::student_assignments::entities::StudentAssignment {
        use crate::models::student_assignments::entities::StudentAssignment;
        use chrono::{DateTime, Utc};

        StudentAssignment {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            qr_code: self.qr_code,
            completed: self.completed,
            points_earned: self.points_earned,
            timestamp: DateTime::<Utc>::from_timestamp(self.timestamp, 0).unwrap_or_default(),
            grader_id: self.grader_id,
            comment: self.comment,
        }
    }
}
