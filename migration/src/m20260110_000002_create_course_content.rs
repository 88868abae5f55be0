use sea_orm_migration::prelude::*;

use super::m20260110_000001_create_users_and_courses::{Course, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lecture::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lecture::LectureId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lecture::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Lecture::Title).string().not_null())
                    .col(ColumnDef::new(Lecture::Description).text().null())
                    .col(ColumnDef::new(Lecture::VideoUrl).string().null())
                    .col(
                        ColumnDef::new(Lecture::Duration)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Lecture::SortOrder).integer().not_null())
                    .col(
                        ColumnDef::new(Lecture::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Lecture::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Lecture::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lecture_course")
                            .from_tbl(Lecture::Table)
                            .from_col(Lecture::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lecture_course_order")
                    .table(Lecture::Table)
                    .col(Lecture::CourseId)
                    .col(Lecture::SortOrder)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Document::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Document::DocumentId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Document::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Document::Title).string().not_null())
                    .col(ColumnDef::new(Document::Description).text().null())
                    .col(ColumnDef::new(Document::FileUrl).string().not_null())
                    .col(ColumnDef::new(Document::FileType).string_len(64).null())
                    .col(ColumnDef::new(Document::SortOrder).integer().not_null())
                    .col(
                        ColumnDef::new(Document::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Document::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Document::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_course")
                            .from_tbl(Document::Table)
                            .from_col(Document::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_document_course_order")
                    .table(Document::Table)
                    .col(Document::CourseId)
                    .col(Document::SortOrder)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Assignment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignment::AssignmentId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignment::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Assignment::Title).string().not_null())
                    .col(ColumnDef::new(Assignment::Description).text().not_null())
                    .col(ColumnDef::new(Assignment::DueDate).timestamp().not_null())
                    .col(ColumnDef::new(Assignment::MaxMarks).integer().not_null())
                    .col(
                        ColumnDef::new(Assignment::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assignment::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Assignment::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignment_course")
                            .from_tbl(Assignment::Table)
                            .from_col(Assignment::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignment_course_due")
                    .table(Assignment::Table)
                    .col(Assignment::CourseId)
                    .col(Assignment::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AssignmentSubmission::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentSubmission::AssignmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmission::StudentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssignmentSubmission::Files).json().not_null())
                    .col(
                        ColumnDef::new(AssignmentSubmission::SubmittedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssignmentSubmission::Marks).integer().null())
                    .col(ColumnDef::new(AssignmentSubmission::Feedback).text().null())
                    .col(ColumnDef::new(AssignmentSubmission::GradedBy).uuid().null())
                    .col(
                        ColumnDef::new(AssignmentSubmission::GradedAt)
                            .timestamp()
                            .null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(AssignmentSubmission::AssignmentId)
                            .col(AssignmentSubmission::StudentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignment_submission_assignment")
                            .from_tbl(AssignmentSubmission::Table)
                            .from_col(AssignmentSubmission::AssignmentId)
                            .to_tbl(Assignment::Table)
                            .to_col(Assignment::AssignmentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignment_submission_student")
                            .from_tbl(AssignmentSubmission::Table)
                            .from_col(AssignmentSubmission::StudentId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignment_submission_grader")
                            .from_tbl(AssignmentSubmission::Table)
                            .from_col(AssignmentSubmission::GradedBy)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AssignmentSubmission::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Document::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lecture::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Lecture {
    Table,
    LectureId,
    CourseId,
    Title,
    Description,
    VideoUrl,
    Duration,
    SortOrder,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Document {
    Table,
    DocumentId,
    CourseId,
    Title,
    Description,
    FileUrl,
    FileType,
    SortOrder,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assignment {
    Table,
    AssignmentId,
    CourseId,
    Title,
    Description,
    DueDate,
    MaxMarks,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AssignmentSubmission {
    Table,
    AssignmentId,
    StudentId,
    Files,
    SubmittedAt,
    Marks,
    Feedback,
    GradedBy,
    GradedAt,
}
