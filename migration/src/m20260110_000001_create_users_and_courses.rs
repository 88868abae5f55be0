use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::UserId).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::Role).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::Bio).text().null())
                    .col(ColumnDef::new(Users::Avatar).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Course::CourseId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Course::Title).string().not_null())
                    .col(ColumnDef::new(Course::Description).text().not_null())
                    .col(ColumnDef::new(Course::Category).string().not_null())
                    .col(ColumnDef::new(Course::Difficulty).string_len(32).not_null())
                    .col(ColumnDef::new(Course::Thumbnail).string().null())
                    .col(ColumnDef::new(Course::EducatorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Course::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Course::Revision)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Course::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Course::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_educator")
                            .from_tbl(Course::Table)
                            .from_col(Course::EducatorId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_educator_id")
                    .table(Course::Table)
                    .col(Course::EducatorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_published_category")
                    .table(Course::Table)
                    .col(Course::IsPublished)
                    .col(Course::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseEnrollment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CourseEnrollment::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseEnrollment::StudentId).uuid().not_null())
                    .col(
                        ColumnDef::new(CourseEnrollment::Progress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseEnrollment::EnrolledAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .primary_key(
                        Index::create()
                            .col(CourseEnrollment::CourseId)
                            .col(CourseEnrollment::StudentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_enrollment_course")
                            .from_tbl(CourseEnrollment::Table)
                            .from_col(CourseEnrollment::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_enrollment_student")
                            .from_tbl(CourseEnrollment::Table)
                            .from_col(CourseEnrollment::StudentId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_enrollment_student_id")
                    .table(CourseEnrollment::Table)
                    .col(CourseEnrollment::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseTa::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CourseTa::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseTa::TaId).uuid().not_null())
                    .col(
                        ColumnDef::new(CourseTa::AssignedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .primary_key(Index::create().col(CourseTa::CourseId).col(CourseTa::TaId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_ta_course")
                            .from_tbl(CourseTa::Table)
                            .from_col(CourseTa::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_ta_user")
                            .from_tbl(CourseTa::Table)
                            .from_col(CourseTa::TaId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseTaStudent::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CourseTaStudent::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseTaStudent::TaId).uuid().not_null())
                    .col(ColumnDef::new(CourseTaStudent::StudentId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(CourseTaStudent::CourseId)
                            .col(CourseTaStudent::TaId)
                            .col(CourseTaStudent::StudentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_ta_student_assignment")
                            .from_tbl(CourseTaStudent::Table)
                            .from_col(CourseTaStudent::CourseId)
                            .from_col(CourseTaStudent::TaId)
                            .to_tbl(CourseTa::Table)
                            .to_col(CourseTa::CourseId)
                            .to_col(CourseTa::TaId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_ta_student_student")
                            .from_tbl(CourseTaStudent::Table)
                            .from_col(CourseTaStudent::StudentId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseTaStudent::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseTa::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseEnrollment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    UserId,
    Name,
    Email,
    Password,
    Role,
    IsActive,
    Bio,
    Avatar,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Course {
    Table,
    CourseId,
    Title,
    Description,
    Category,
    Difficulty,
    Thumbnail,
    EducatorId,
    IsPublished,
    Revision,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CourseEnrollment {
    Table,
    CourseId,
    StudentId,
    Progress,
    EnrolledAt,
}

#[derive(DeriveIden)]
enum CourseTa {
    Table,
    CourseId,
    TaId,
    AssignedAt,
}

#[derive(DeriveIden)]
enum CourseTaStudent {
    Table,
    CourseId,
    TaId,
    StudentId,
}
