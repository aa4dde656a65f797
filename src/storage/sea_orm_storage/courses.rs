//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::course_members::{
    ActiveModel as MemberActiveModel, Column as MemberColumn, Entity as CourseMembers,
};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{CourseManagerError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    courses::{
        entities::{Course, CourseDetail, CourseRole},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::{CourseListResponse, UserCoursesResponse},
    },
};
use crate::utils::escape_like_pattern;
use crate::utils::validate::{validate_course_id, validate_title};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程，课程与初始成员在同一事务内写入
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<CourseDetail> {
        validate_course_id(&req.id).map_err(CourseManagerError::validation)?;
        validate_title(&req.title).map_err(CourseManagerError::validation)?;
        if req.instructors.is_empty() {
            return Err(CourseManagerError::validation(
                "A course needs at least one instructor",
            ));
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseManagerError::from_db_err("开启事务失败", e))?;

        let course = ActiveModel {
            id: Set(req.id.clone()),
            title: Set(req.title),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| CourseManagerError::from_db_err("创建课程失败", e))?;

        let roster = [
            (CourseRole::Instructor, req.instructors),
            (CourseRole::Ta, req.tas),
            (CourseRole::Student, req.students),
        ];
        for (role, mut user_ids) in roster {
            user_ids.sort_unstable();
            user_ids.dedup();
            for user_id in user_ids {
                MemberActiveModel {
                    course_id: Set(req.id.clone()),
                    user_id: Set(user_id),
                    role: Set(role.to_string()),
                    joined_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| {
                    CourseManagerError::from_db_err(&format!("添加课程成员 {user_id} 失败"), e)
                })?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| CourseManagerError::from_db_err("提交事务失败", e))?;

        let members = self.list_course_members_impl(&course.id, None).await?;
        Ok(CourseDetail::new(course.into_course(), members))
    }

    /// 通过课程号获取课程
    pub async fn get_course_by_id_impl(&self, course_id: &str) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询课程失败", e))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 获取课程及其全部成员
    pub async fn get_course_detail_impl(&self, course_id: &str) -> Result<Option<CourseDetail>> {
        let Some(course) = self.get_course_by_id_impl(course_id).await? else {
            return Ok(None);
        };
        let members = self.list_course_members_impl(course_id, None).await?;
        Ok(Some(CourseDetail::new(course, members)))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let (page, size) = PaginationQuery::normalize(query.page, query.size);

        let mut select = Courses::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Id.contains(&escaped))
                    .add(Column::Title.contains(&escaped)),
            );
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询课程总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询课程页数失败", e))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询课程列表失败", e))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: &str,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(course_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(course_id.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            validate_title(&title).map_err(CourseManagerError::validation)?;
            model.title = Set(title);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("更新课程失败", e))?;

        Ok(Some(updated.into_course()))
    }

    /// 删除课程，成员、作业组、作业与学生作业记录级联删除
    pub async fn delete_course_impl(&self, course_id: &str) -> Result<bool> {
        let result = Courses::delete_by_id(course_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("删除课程失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出用户参与的课程，按角色分组
    pub async fn list_user_courses_impl(&self, user_id: i64) -> Result<UserCoursesResponse> {
        let rows = CourseMembers::find()
            .filter(MemberColumn::UserId.eq(user_id))
            .find_also_related(Courses)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询用户课程失败", e))?;

        let mut response = UserCoursesResponse::default();
        for (member, course) in rows {
            let Some(course) = course else { continue };
            let member = member.into_course_member();
            let course = course.into_course();
            match member.role {
                CourseRole::Instructor => response.instructor_courses.push(course),
                CourseRole::Ta => response.ta_courses.push(course),
                CourseRole::Student => response.student_courses.push(course),
            }
        }

        Ok(response)
    }
}
