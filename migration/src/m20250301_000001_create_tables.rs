use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::DisplayName).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表，课程号即主键
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .string_len(100)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::Title)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程成员表（教师 / 助教 / 学生三种角色）
        manager
            .create_table(
                Table::create()
                    .table(CourseMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseMembers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseMembers::CourseId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseMembers::UserId).big_integer().not_null())
                    .col(ColumnDef::new(CourseMembers::Role).string().not_null())
                    .col(
                        ColumnDef::new(CourseMembers::JoinedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseMembers::Table, CourseMembers::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseMembers::Table, CourseMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业组表
        manager
            .create_table(
                Table::create()
                    .table(AssignmentGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentGroups::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentGroups::CourseId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentGroups::Title)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentGroups::Points)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(AssignmentGroups::Points).gte(0)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssignmentGroups::Table, AssignmentGroups::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CourseId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::GroupId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Assignments::Title)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::Points)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(Assignments::Points).gte(0)),
                    )
                    .col(ColumnDef::new(Assignments::DueDate).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::GroupId)
                            .to(AssignmentGroups::Table, AssignmentGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生作业记录表
        manager
            .create_table(
                Table::create()
                    .table(StudentAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentAssignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::QrCode)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::PointsEarned)
                            .small_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(StudentAssignments::PointsEarned).gte(0)),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::Timestamp)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::GraderId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::Comment)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAssignments::Table, StudentAssignments::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAssignments::Table, StudentAssignments::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAssignments::Table, StudentAssignments::GraderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 复合唯一约束
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_course_members_course_user_role")
                    .table(CourseMembers::Table)
                    .col(CourseMembers::CourseId)
                    .col(CourseMembers::UserId)
                    .col(CourseMembers::Role)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_student_assignments_assignment_student")
                    .table(StudentAssignments::Table)
                    .col(StudentAssignments::AssignmentId)
                    .col(StudentAssignments::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 签到按二维码查找，必须唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_student_assignments_qr_code")
                    .table(StudentAssignments::Table)
                    .col(StudentAssignments::QrCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 普通索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_members_user_id")
                    .table(CourseMembers::Table)
                    .col(CourseMembers::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignment_groups_course_id")
                    .table(AssignmentGroups::Table)
                    .col(AssignmentGroups::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_course_id")
                    .table(Assignments::Table)
                    .col(Assignments::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_group_id")
                    .table(Assignments::Table)
                    .col(Assignments::GroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_due_date")
                    .table(Assignments::Table)
                    .col(Assignments::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_assignments_student_id")
                    .table(StudentAssignments::Table)
                    .col(StudentAssignments::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(StudentAssignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssignmentGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    DisplayName,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Title,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CourseMembers {
    #[sea_orm(iden = "course_members")]
    Table,
    Id,
    CourseId,
    UserId,
    Role,
    JoinedAt,
}

#[derive(DeriveIden)]
enum AssignmentGroups {
    #[sea_orm(iden = "assignment_groups")]
    Table,
    Id,
    CourseId,
    Title,
    Points,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    CourseId,
    GroupId,
    Title,
    Points,
    DueDate,
}

#[derive(DeriveIden)]
enum StudentAssignments {
    #[sea_orm(iden = "student_assignments")]
    Table,
    Id,
    AssignmentId,
    StudentId,
    QrCode,
    Completed,
    PointsEarned,
    Timestamp,
    GraderId,
    Comment,
}
