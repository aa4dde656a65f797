//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::course_members::{Column as MemberColumn, Entity as CourseMembers};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{CourseManagerError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    courses::entities::CourseRole,
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            display_name: Set(req.display_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("创建用户失败", e))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取用户
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = PaginationQuery::normalize(query.page, query.size);

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::DisplayName.contains(&escaped)),
            );
        }

        // 角色筛选
        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 课程成员筛选，任一角色均计入
        if let Some(course_id) = query.course_id {
            select = select.filter(
                Column::Id.in_subquery(
                    Query::select()
                        .column(MemberColumn::UserId)
                        .from(CourseMembers)
                        .and_where(MemberColumn::CourseId.eq(course_id))
                        .to_owned(),
                ),
            );
        }

        select = select.order_by_asc(Column::Username);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询用户总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询用户页数失败", e))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询用户列表失败", e))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("更新最后登录时间失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除用户，课程成员与学生作业记录随之级联删除，评分人置空
    ///
    /// 用户是某门课程唯一的教师时拒绝删除。
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseManagerError::from_db_err("开启事务失败", e))?;

        let taught: Vec<String> = CourseMembers::find()
            .select_only()
            .column(MemberColumn::CourseId)
            .filter(MemberColumn::UserId.eq(id))
            .filter(MemberColumn::Role.eq(CourseRole::INSTRUCTOR))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| CourseManagerError::from_db_err("查询用户授课课程失败", e))?;

        for course_id in taught {
            let instructors = CourseMembers::find()
                .filter(MemberColumn::CourseId.eq(course_id.as_str()))
                .filter(MemberColumn::Role.eq(CourseRole::INSTRUCTOR))
                .count(&txn)
                .await
                .map_err(|e| CourseManagerError::from_db_err("统计课程教师失败", e))?;

            if instructors <= 1 {
                return Err(CourseManagerError::validation(format!(
                    "User is the last instructor of course {course_id}"
                )));
            }
        }

        let result = Users::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| CourseManagerError::from_db_err("删除用户失败", e))?;

        txn.commit()
            .await
            .map_err(|e| CourseManagerError::from_db_err("提交事务失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| CourseManagerError::from_db_err("统计用户数量失败", e))?;

        Ok(count)
    }
}
