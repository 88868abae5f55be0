use sea_orm_migration::prelude::*;

use super::m20260110_000001_create_users_and_courses::{Course, Users};
use super::m20260110_000002_create_course_content::{Document, Lecture};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StudentProgress::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StudentProgress::StudentId).uuid().not_null())
                    .col(ColumnDef::new(StudentProgress::CourseId).uuid().not_null())
                    .col(
                        ColumnDef::new(StudentProgress::OverallProgress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StudentProgress::LastAccessedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProgress::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(StudentProgress::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .primary_key(
                        Index::create()
                            .col(StudentProgress::StudentId)
                            .col(StudentProgress::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_progress_student")
                            .from_tbl(StudentProgress::Table)
                            .from_col(StudentProgress::StudentId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_progress_course")
                            .from_tbl(StudentProgress::Table)
                            .from_col(StudentProgress::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LectureWatch::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LectureWatch::StudentId).uuid().not_null())
                    .col(ColumnDef::new(LectureWatch::LectureId).uuid().not_null())
                    .col(ColumnDef::new(LectureWatch::CourseId).uuid().not_null())
                    .col(
                        ColumnDef::new(LectureWatch::WatchTime)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LectureWatch::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(LectureWatch::LastWatchedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(LectureWatch::StudentId)
                            .col(LectureWatch::LectureId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lecture_watch_student")
                            .from_tbl(LectureWatch::Table)
                            .from_col(LectureWatch::StudentId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lecture_watch_lecture")
                            .from_tbl(LectureWatch::Table)
                            .from_col(LectureWatch::LectureId)
                            .to_tbl(Lecture::Table)
                            .to_col(Lecture::LectureId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lecture_watch_student_course")
                    .table(LectureWatch::Table)
                    .col(LectureWatch::StudentId)
                    .col(LectureWatch::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DocumentView::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DocumentView::StudentId).uuid().not_null())
                    .col(ColumnDef::new(DocumentView::DocumentId).uuid().not_null())
                    .col(ColumnDef::new(DocumentView::CourseId).uuid().not_null())
                    .col(ColumnDef::new(DocumentView::ViewedAt).timestamp().not_null())
                    .primary_key(
                        Index::create()
                            .col(DocumentView::StudentId)
                            .col(DocumentView::DocumentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_view_student")
                            .from_tbl(DocumentView::Table)
                            .from_col(DocumentView::StudentId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_view_document")
                            .from_tbl(DocumentView::Table)
                            .from_col(DocumentView::DocumentId)
                            .to_tbl(Document::Table)
                            .to_col(Document::DocumentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_document_view_student_course")
                    .table(DocumentView::Table)
                    .col(DocumentView::StudentId)
                    .col(DocumentView::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MentorshipSession::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MentorshipSession::SessionId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MentorshipSession::TaId).uuid().not_null())
                    .col(ColumnDef::new(MentorshipSession::StudentId).uuid().not_null())
                    .col(ColumnDef::new(MentorshipSession::CourseId).uuid().not_null())
                    .col(ColumnDef::new(MentorshipSession::Title).string().not_null())
                    .col(ColumnDef::new(MentorshipSession::Description).text().null())
                    .col(
                        ColumnDef::new(MentorshipSession::ScheduledAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipSession::DurationMinutes)
                            .integer()
                            .not_null()
                            .default(60),
                    )
                    .col(ColumnDef::new(MentorshipSession::MeetingLink).string().null())
                    .col(
                        ColumnDef::new(MentorshipSession::Status)
                            .string_len(32)
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(MentorshipSession::Notes).text().null())
                    .col(ColumnDef::new(MentorshipSession::Rating).small_integer().null())
                    .col(ColumnDef::new(MentorshipSession::RatingFeedback).text().null())
                    .col(ColumnDef::new(MentorshipSession::RatedBy).uuid().null())
                    .col(
                        ColumnDef::new(MentorshipSession::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(MentorshipSession::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mentorship_session_ta")
                            .from_tbl(MentorshipSession::Table)
                            .from_col(MentorshipSession::TaId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mentorship_session_student")
                            .from_tbl(MentorshipSession::Table)
                            .from_col(MentorshipSession::StudentId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mentorship_session_course")
                            .from_tbl(MentorshipSession::Table)
                            .from_col(MentorshipSession::CourseId)
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
                    .name("idx_mentorship_session_ta_schedule")
                    .table(MentorshipSession::Table)
                    .col(MentorshipSession::TaId)
                    .col(MentorshipSession::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mentorship_session_student_id")
                    .table(MentorshipSession::Table)
                    .col(MentorshipSession::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IndustryRating::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(IndustryRating::CourseId).uuid().not_null())
                    .col(ColumnDef::new(IndustryRating::ExpertId).uuid().not_null())
                    .col(
                        ColumnDef::new(IndustryRating::ContentQuality)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IndustryRating::IndustryRelevance)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IndustryRating::PracticalApplication)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IndustryRating::Overall)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(IndustryRating::Feedback).text().null())
                    .col(
                        ColumnDef::new(IndustryRating::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(IndustryRating::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .primary_key(
                        Index::create()
                            .col(IndustryRating::CourseId)
                            .col(IndustryRating::ExpertId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_industry_rating_course")
                            .from_tbl(IndustryRating::Table)
                            .from_col(IndustryRating::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_industry_rating_expert")
                            .from_tbl(IndustryRating::Table)
                            .from_col(IndustryRating::ExpertId)
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
            .drop_table(Table::drop().table(IndustryRating::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MentorshipSession::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DocumentView::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LectureWatch::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentProgress::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum StudentProgress {
    Table,
    StudentId,
    CourseId,
    OverallProgress,
    LastAccessedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LectureWatch {
    Table,
    StudentId,
    LectureId,
    CourseId,
    WatchTime,
    Completed,
    LastWatchedAt,
}

#[derive(DeriveIden)]
enum DocumentView {
    Table,
    StudentId,
    DocumentId,
    CourseId,
    ViewedAt,
}

#[derive(DeriveIden)]
enum MentorshipSession {
    Table,
    SessionId,
    TaId,
    StudentId,
    CourseId,
    Title,
    Description,
    ScheduledAt,
    DurationMinutes,
    MeetingLink,
    Status,
    Notes,
    Rating,
    RatingFeedback,
    RatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum IndustryRating {
    Table,
    CourseId,
    ExpertId,
    ContentQuality,
    IndustryRelevance,
    PracticalApplication,
    Overall,
    Feedback,
    CreatedAt,
    UpdatedAt,
}
