//! 课程成员存储操作

use super::SeaOrmStorage;
use crate::entity::course_members::{ActiveModel, Column, Entity as CourseMembers};
use crate::errors::{CourseManagerError, Result};
use crate::models::courses::entities::{CourseMember, CourseRole};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 添加课程成员，同一角色重复添加返回冲突
    pub async fn add_course_member_impl(
        &self,
        course_id: &str,
        user_id: i64,
        role: CourseRole,
    ) -> Result<CourseMember> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id.to_string()),
            user_id: Set(user_id),
            role: Set(role.to_string()),
            joined_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("添加课程成员失败", e))?;

        Ok(result.into_course_member())
    }

    /// 移除课程成员，课程的最后一名教师不能被移除
    pub async fn remove_course_member_impl(
        &self,
        course_id: &str,
        user_id: i64,
        role: CourseRole,
    ) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseManagerError::from_db_err("开启事务失败", e))?;

        let membership = Condition::all()
            .add(Column::CourseId.eq(course_id))
            .add(Column::UserId.eq(user_id))
            .add(Column::Role.eq(role.to_string()));

        if role == CourseRole::Instructor {
            let is_member = CourseMembers::find()
                .filter(membership.clone())
                .count(&txn)
                .await
                .map_err(|e| CourseManagerError::from_db_err("查询课程成员失败", e))?
                > 0;
            let instructors = CourseMembers::find()
                .filter(
                    Condition::all()
                        .add(Column::CourseId.eq(course_id))
                        .add(Column::Role.eq(CourseRole::INSTRUCTOR)),
                )
                .count(&txn)
                .await
                .map_err(|e| CourseManagerError::from_db_err("统计课程教师失败", e))?;

            if is_member && instructors <= 1 {
                return Err(CourseManagerError::validation(
                    "Cannot remove the last instructor of a course",
                ));
            }
        }

        let result = CourseMembers::delete_many()
            .filter(membership)
            .exec(&txn)
            .await
            .map_err(|e| CourseManagerError::from_db_err("移除课程成员失败", e))?;

        txn.commit()
            .await
            .map_err(|e| CourseManagerError::from_db_err("提交事务失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出课程成员，可按角色过滤
    pub async fn list_course_members_impl(
        &self,
        course_id: &str,
        role: Option<CourseRole>,
    ) -> Result<Vec<CourseMember>> {
        let mut select = CourseMembers::find().filter(Column::CourseId.eq(course_id));

        if let Some(role) = role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        let members = select
            .order_by_asc(Column::UserId)
            .all(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询课程成员失败", e))?;

        Ok(members.into_iter().map(|m| m.into_course_member()).collect())
    }

    /// 用户在课程中的全部角色，非成员返回空列表
    pub async fn get_user_course_roles_impl(
        &self,
        course_id: &str,
        user_id: i64,
    ) -> Result<Vec<CourseRole>> {
        let members = CourseMembers::find()
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::UserId.eq(user_id)),
            )
            .all(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询课程角色失败", e))?;

        Ok(members
            .into_iter()
            .map(|m| m.into_course_member().role)
            .collect())
    }
}
