//! 作业组存储操作

use super::SeaOrmStorage;
use crate::entity::assignment_groups::{ActiveModel, Column, Entity as AssignmentGroups};
use crate::errors::{CourseManagerError, Result};
use crate::models::assignment_groups::{
    entities::AssignmentGroup,
    requests::{CreateAssignmentGroupRequest, UpdateAssignmentGroupRequest},
};
use crate::utils::validate::{validate_points, validate_title};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, Unchanged};

impl SeaOrmStorage {
    /// 在课程下创建作业组
    pub async fn create_assignment_group_impl(
        &self,
        course_id: &str,
        req: CreateAssignmentGroupRequest,
    ) -> Result<AssignmentGroup> {
        validate_title(&req.title).map_err(CourseManagerError::validation)?;
        let points = validate_points(req.points).map_err(CourseManagerError::validation)?;

        let model = ActiveModel {
            course_id: Set(course_id.to_string()),
            title: Set(req.title),
            points: Set(points),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("创建作业组失败", e))?;

        Ok(result.into_assignment_group())
    }

    /// 通过 ID 获取作业组
    pub async fn get_assignment_group_by_id_impl(
        &self,
        group_id: i64,
    ) -> Result<Option<AssignmentGroup>> {
        let result = AssignmentGroups::find_by_id(group_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询作业组失败", e))?;

        Ok(result.map(|m| m.into_assignment_group()))
    }

    /// 列出课程下的作业组，按分值、标题排序
    pub async fn list_course_assignment_groups_impl(
        &self,
        course_id: &str,
    ) -> Result<Vec<AssignmentGroup>> {
        let groups = AssignmentGroups::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Points)
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询作业组列表失败", e))?;

        Ok(groups
            .into_iter()
            .map(|m| m.into_assignment_group())
            .collect())
    }

    /// 更新作业组，所属课程不可修改
    pub async fn update_assignment_group_impl(
        &self,
        group_id: i64,
        update: UpdateAssignmentGroupRequest,
    ) -> Result<Option<AssignmentGroup>> {
        if self.get_assignment_group_by_id_impl(group_id).await?.is_none() {
            return Ok(None);
        }

        // 主键保持 Unchanged，is_changed 只反映业务字段
        let mut model = ActiveModel {
            id: Unchanged(group_id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            validate_title(&title).map_err(CourseManagerError::validation)?;
            model.title = Set(title);
        }

        if let Some(points) = update.points {
            model.points = Set(validate_points(points).map_err(CourseManagerError::validation)?);
        }

        if !model.is_changed() {
            return self.get_assignment_group_by_id_impl(group_id).await;
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("更新作业组失败", e))?;

        Ok(Some(updated.into_assignment_group()))
    }

    /// 删除作业组，组内作业及其学生作业记录级联删除
    pub async fn delete_assignment_group_impl(&self, group_id: i64) -> Result<bool> {
        let result = AssignmentGroups::delete_by_id(group_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("删除作业组失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
