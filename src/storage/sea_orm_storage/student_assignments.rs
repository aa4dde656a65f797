//! 学生作业记录存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::Column as AssignmentColumn;
use crate::entity::student_assignments::{
    ActiveModel, Column, Entity as StudentAssignments, Relation,
};
use crate::errors::{CourseManagerError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    courses::entities::CourseRole,
    student_assignments::{
        entities::StudentAssignment,
        requests::{
            CreateStudentAssignmentRequest, StudentAssignmentListQuery,
            UpdateStudentAssignmentRequest,
        },
        responses::StudentAssignmentListResponse,
    },
};
use crate::utils::random_code::generate_random_code;
use crate::utils::validate::{MAX_TITLE_LEN, validate_points};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, Unchanged,
};

const QR_CODE_LEN: usize = 16;

fn normalize_qr_code(qr_code: Option<String>) -> Result<String> {
    match qr_code.map(|code| code.trim().to_string()) {
        Some(code) if code.is_empty() => Err(CourseManagerError::validation(
            "QR code must not be blank",
        )),
        Some(code) if code.chars().count() > MAX_TITLE_LEN => Err(
            CourseManagerError::validation("QR code must be at most 100 characters"),
        ),
        Some(code) => Ok(code),
        None => Ok(generate_random_code(QR_CODE_LEN)),
    }
}

impl SeaOrmStorage {
    /// 创建学生作业记录，学生必须是作业所在课程的学生
    pub async fn create_student_assignment_impl(
        &self,
        req: CreateStudentAssignmentRequest,
    ) -> Result<StudentAssignment> {
        let assignment = self
            .get_assignment_by_id_impl(req.assignment_id)
            .await?
            .ok_or_else(|| {
                CourseManagerError::validation(format!(
                    "Assignment {} does not exist",
                    req.assignment_id
                ))
            })?;

        let roles = self
            .get_user_course_roles_impl(&assignment.course_id, req.student_id)
            .await?;
        if !roles.contains(&CourseRole::Student) {
            return Err(CourseManagerError::validation(format!(
                "User {} is not a student of course {}",
                req.student_id, assignment.course_id
            )));
        }

        let points_earned = validate_points(req.points_earned.unwrap_or(0))
            .map_err(CourseManagerError::validation)?;
        let qr_code = normalize_qr_code(req.qr_code)?;

        let model = ActiveModel {
            assignment_id: Set(req.assignment_id),
            student_id: Set(req.student_id),
            qr_code: Set(qr_code),
            completed: Set(req.completed.unwrap_or(false)),
            points_earned: Set(points_earned),
            timestamp: Set(chrono::Utc::now().timestamp()),
            grader_id: Set(req.grader_id),
            comment: Set(req.comment.unwrap_or_default()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("创建学生作业记录失败", e))?;

        Ok(result.into_student_assignment())
    }

    /// 通过 ID 获取学生作业记录
    pub async fn get_student_assignment_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<StudentAssignment>> {
        let result = StudentAssignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询学生作业记录失败", e))?;

        Ok(result.map(|m| m.into_student_assignment()))
    }

    /// 通过签到二维码获取学生作业记录
    pub async fn get_student_assignment_by_qr_code_impl(
        &self,
        qr_code: &str,
    ) -> Result<Option<StudentAssignment>> {
        let result = StudentAssignments::find()
            .filter(Column::QrCode.eq(qr_code))
            .one(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询学生作业记录失败", e))?;

        Ok(result.map(|m| m.into_student_assignment()))
    }

    /// 分页列出学生作业记录，按所属作业的截止时间、分值、标题排序
    pub async fn list_student_assignments_with_pagination_impl(
        &self,
        query: StudentAssignmentListQuery,
    ) -> Result<StudentAssignmentListResponse> {
        let (page, size) = PaginationQuery::normalize(query.page, query.size);

        let mut select =
            StudentAssignments::find().join(JoinType::InnerJoin, Relation::Assignment.def());

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(ref course_id) = query.course_id {
            select = select.filter(AssignmentColumn::CourseId.eq(course_id.as_str()));
        }

        select = select
            .order_by_asc(AssignmentColumn::DueDate)
            .order_by_asc(AssignmentColumn::Points)
            .order_by_asc(AssignmentColumn::Title)
            .order_by_asc(Column::StudentId);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询学生作业记录总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询学生作业记录页数失败", e))?;

        let records = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询学生作业记录列表失败", e))?;

        Ok(StudentAssignmentListResponse {
            items: records
                .into_iter()
                .map(|m| m.into_student_assignment())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新（评分）学生作业记录，每次写入刷新时间戳
    pub async fn update_student_assignment_impl(
        &self,
        id: i64,
        update: UpdateStudentAssignmentRequest,
    ) -> Result<Option<StudentAssignment>> {
        if self.get_student_assignment_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Unchanged(id),
            timestamp: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(completed) = update.completed {
            model.completed = Set(completed);
        }

        if let Some(points_earned) = update.points_earned {
            model.points_earned =
                Set(validate_points(points_earned).map_err(CourseManagerError::validation)?);
        }

        if let Some(comment) = update.comment {
            model.comment = Set(comment);
        }

        if let Some(grader_id) = update.grader_id {
            model.grader_id = Set(Some(grader_id));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("更新学生作业记录失败", e))?;

        Ok(Some(updated.into_student_assignment()))
    }

    /// 扫码签到：标记完成，记录操作人并刷新时间戳
    pub async fn check_in_student_assignment_impl(
        &self,
        qr_code: &str,
        grader_id: i64,
    ) -> Result<Option<StudentAssignment>> {
        let Some(existing) = self.get_student_assignment_by_qr_code_impl(qr_code).await? else {
            return Ok(None);
        };

        let model = ActiveModel {
            id: Unchanged(existing.id),
            completed: Set(true),
            grader_id: Set(Some(grader_id)),
            timestamp: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("签到失败", e))?;

        Ok(Some(updated.into_student_assignment()))
    }

    /// 删除学生作业记录
    pub async fn delete_student_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = StudentAssignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("删除学生作业记录失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
