//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignment_groups;
mod assignments;
mod course_members;
mod courses;
mod student_assignments;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{CourseManagerError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 按给定数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseManagerError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseManagerError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        // 内存库随连接销毁，只能保持单个常驻连接
        let in_memory = url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size.max(1))
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| {
                CourseManagerError::database_connection(format!("SQLite 连接失败: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(config.pool_size.min(5))
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(|e| {
            CourseManagerError::database_connection(format!("无法连接到数据库: {e}"))
        })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseManagerError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignment_groups::{
        entities::AssignmentGroup,
        requests::{CreateAssignmentGroupRequest, UpdateAssignmentGroupRequest},
    },
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    courses::{
        entities::{Course, CourseDetail, CourseMember, CourseRole},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::{CourseListResponse, UserCoursesResponse},
    },
    student_assignments::{
        entities::StudentAssignment,
        requests::{
            CreateStudentAssignmentRequest, StudentAssignmentListQuery,
            UpdateStudentAssignmentRequest,
        },
        responses::StudentAssignmentListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<CourseDetail> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: &str) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_course_detail(&self, course_id: &str) -> Result<Option<CourseDetail>> {
        self.get_course_detail_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: &str,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: &str) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn list_user_courses(&self, user_id: i64) -> Result<UserCoursesResponse> {
        self.list_user_courses_impl(user_id).await
    }

    // 课程成员模块
    async fn add_course_member(
        &self,
        course_id: &str,
        user_id: i64,
        role: CourseRole,
    ) -> Result<CourseMember> {
        self.add_course_member_impl(course_id, user_id, role).await
    }

    async fn remove_course_member(
        &self,
        course_id: &str,
        user_id: i64,
        role: CourseRole,
    ) -> Result<bool> {
        self.remove_course_member_impl(course_id, user_id, role)
            .await
    }

    async fn list_course_members(
        &self,
        course_id: &str,
        role: Option<CourseRole>,
    ) -> Result<Vec<CourseMember>> {
        self.list_course_members_impl(course_id, role).await
    }

    async fn get_user_course_roles(
        &self,
        course_id: &str,
        user_id: i64,
    ) -> Result<Vec<CourseRole>> {
        self.get_user_course_roles_impl(course_id, user_id).await
    }

    // 作业组模块
    async fn create_assignment_group(
        &self,
        course_id: &str,
        group: CreateAssignmentGroupRequest,
    ) -> Result<AssignmentGroup> {
        self.create_assignment_group_impl(course_id, group).await
    }

    async fn get_assignment_group_by_id(&self, group_id: i64) -> Result<Option<AssignmentGroup>> {
        self.get_assignment_group_by_id_impl(group_id).await
    }

    async fn list_course_assignment_groups(
        &self,
        course_id: &str,
    ) -> Result<Vec<AssignmentGroup>> {
        self.list_course_assignment_groups_impl(course_id).await
    }

    async fn update_assignment_group(
        &self,
        group_id: i64,
        update: UpdateAssignmentGroupRequest,
    ) -> Result<Option<AssignmentGroup>> {
        self.update_assignment_group_impl(group_id, update).await
    }

    async fn delete_assignment_group(&self, group_id: i64) -> Result<bool> {
        self.delete_assignment_group_impl(group_id).await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn list_group_assignments(&self, group_id: i64) -> Result<Vec<Assignment>> {
        self.list_group_assignments_impl(group_id).await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(assignment_id, update).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    // 学生作业记录模块
    async fn create_student_assignment(
        &self,
        record: CreateStudentAssignmentRequest,
    ) -> Result<StudentAssignment> {
        self.create_student_assignment_impl(record).await
    }

    async fn get_student_assignment_by_id(&self, id: i64) -> Result<Option<StudentAssignment>> {
        self.get_student_assignment_by_id_impl(id).await
    }

    async fn get_student_assignment_by_qr_code(
        &self,
        qr_code: &str,
    ) -> Result<Option<StudentAssignment>> {
        self.get_student_assignment_by_qr_code_impl(qr_code).await
    }

    async fn list_student_assignments_with_pagination(
        &self,
        query: StudentAssignmentListQuery,
    ) -> Result<StudentAssignmentListResponse> {
        self.list_student_assignments_with_pagination_impl(query)
            .await
    }

    async fn update_student_assignment(
        &self,
        id: i64,
        update: UpdateStudentAssignmentRequest,
    ) -> Result<Option<StudentAssignment>> {
        self.update_student_assignment_impl(id, update).await
    }

    async fn check_in_student_assignment(
        &self,
        qr_code: &str,
        grader_id: i64,
    ) -> Result<Option<StudentAssignment>> {
        self.check_in_student_assignment_impl(qr_code, grader_id)
            .await
    }

    async fn delete_student_assignment(&self, id: i64) -> Result<bool> {
        self.delete_student_assignment_impl(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_inference() {
        assert_eq!(
            SeaOrmStorage::build_database_url("data/course.db").as_deref(),
            Ok("sqlite://data/course.db?mode=rwc")
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").as_deref(),
            Ok("sqlite::memory:")
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite::memory:").as_deref(),
            Ok("sqlite::memory:")
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/cm").as_deref(),
            Ok("postgres://u:p@localhost/cm")
        );
    }

    #[test]
    fn test_unknown_database_url_is_config_error() {
        let err = SeaOrmStorage::build_database_url("redis://localhost").unwrap_err();
        assert_eq!(err.code(), "E001");
    }

    #[tokio::test]
    async fn test_schema_rejects_negative_points() {
        use crate::entity::{assignment_groups, courses};
        use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Set};

        let storage = SeaOrmStorage::connect(&DatabaseConfig {
            url: ":memory:".to_string(),
            pool_size: 1,
            timeout: 30,
        })
        .await
        .expect("in-memory database");

        courses::ActiveModel {
            id: Set("CS101".to_string()),
            title: Set("Intro".to_string()),
            created_at: Set(0),
            updated_at: Set(0),
        }
        .insert(&storage.db)
        .await
        .expect("insert course");

        let negative = assignment_groups::ActiveModel {
            id: NotSet,
            course_id: Set("CS101".to_string()),
            title: Set("Homework".to_string()),
            points: Set(-5),
        }
        .insert(&storage.db)
        .await;
        assert!(negative.is_err());

        let group = assignment_groups::ActiveModel {
            id: NotSet,
            course_id: Set("CS101".to_string()),
            title: Set("Labs".to_string()),
            points: Set(0),
        }
        .insert(&storage.db)
        .await
        .expect("zero points allowed");

        let mut lowered: assignment_groups::ActiveModel = group.into();
        lowered.points = Set(-1);
        assert!(lowered.update(&storage.db).await.is_err());
    }
}
