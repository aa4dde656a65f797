//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{CourseManagerError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
};
use crate::utils::validate::{validate_points, validate_title};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
    Set, Unchanged,
};

// 截止时间、分值、标题
fn ordered(select: Select<Assignments>) -> Select<Assignments> {
    select
        .order_by_asc(Column::DueDate)
        .order_by_asc(Column::Points)
        .order_by_asc(Column::Title)
}

impl SeaOrmStorage {
    /// 作业组必须存在且属于指定课程
    async fn ensure_group_in_course(&self, group_id: i64, course_id: &str) -> Result<()> {
        let group = self
            .get_assignment_group_by_id_impl(group_id)
            .await?
            .ok_or_else(|| {
                CourseManagerError::validation(format!("Assignment group {group_id} does not exist"))
            })?;

        if group.course_id != course_id {
            return Err(CourseManagerError::validation(format!(
                "Assignment group {group_id} belongs to course {}, not {course_id}",
                group.course_id
            )));
        }
        Ok(())
    }

    /// 创建作业
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        validate_title(&req.title).map_err(CourseManagerError::validation)?;
        let points = validate_points(req.points).map_err(CourseManagerError::validation)?;
        self.ensure_group_in_course(req.group_id, &req.course_id)
            .await?;

        let model = ActiveModel {
            course_id: Set(req.course_id),
            group_id: Set(req.group_id),
            title: Set(req.title),
            points: Set(points),
            due_date: Set(req.due_date.timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("创建作业失败", e))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询作业失败", e))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出作业，可按课程或作业组过滤
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let (page, size) = PaginationQuery::normalize(query.page, query.size);

        let mut select = Assignments::find();

        if let Some(ref course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id.as_str()));
        }

        if let Some(group_id) = query.group_id {
            select = select.filter(Column::GroupId.eq(group_id));
        }

        if let Some(course_ids) = query.course_ids {
            select = select.filter(Column::CourseId.is_in(course_ids));
        }

        let paginator = ordered(select).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询作业总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询作业页数失败", e))?;

        let assignments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询作业列表失败", e))?;

        Ok(AssignmentListResponse {
            items: assignments.into_iter().map(|m| m.into_assignment()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 列出作业组内全部作业
    pub async fn list_group_assignments_impl(&self, group_id: i64) -> Result<Vec<Assignment>> {
        let assignments = ordered(Assignments::find().filter(Column::GroupId.eq(group_id)))
            .all(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询作业组内作业失败", e))?;

        Ok(assignments.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 更新作业，更换作业组时新组必须属于同一课程
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let Some(existing) = self.get_assignment_by_id_impl(assignment_id).await? else {
            return Ok(None);
        };

        // 主键保持 Unchanged，is_changed 只反映业务字段
        let mut model = ActiveModel {
            id: Unchanged(assignment_id),
            ..Default::default()
        };

        if let Some(group_id) = update.group_id
            && group_id != existing.group_id
        {
            self.ensure_group_in_course(group_id, &existing.course_id)
                .await?;
            model.group_id = Set(group_id);
        }

        if let Some(title) = update.title {
            validate_title(&title).map_err(CourseManagerError::validation)?;
            model.title = Set(title);
        }

        if let Some(points) = update.points {
            model.points = Set(validate_points(points).map_err(CourseManagerError::validation)?);
        }

        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date.timestamp());
        }

        if !model.is_changed() {
            return Ok(Some(existing));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("更新作业失败", e))?;

        Ok(Some(updated.into_assignment()))
    }

    /// 删除作业，学生作业记录级联删除
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(assignment_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("删除作业失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
