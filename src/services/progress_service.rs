use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use super::{course_relationship, load_course};
use crate::domain::progress::{WatchState, merge_watch, overall_progress};
use crate::domain::{Action, Actor, authorize};
use crate::entities::sea_orm_active_enums::SessionStatusEnum;
use crate::entities::{course, document_view, lecture_watch, student_progress, user};
use crate::error::{AppError, AppResult};
use crate::repositories::{
    CourseRepository, DocumentRepository, EnrollmentRepository, LectureRepository,
    MentorshipRepository, ProgressRepository, UserRepository,
};

#[derive(Debug)]
pub struct CourseProgress {
    pub progress: student_progress::Model,
    pub published_lectures: u64,
    pub published_documents: u64,
    pub watches: Vec<lecture_watch::Model>,
    pub views: Vec<document_view::Model>,
}

#[derive(Debug)]
pub struct StudentCourseProgress {
    pub course: course::Model,
    pub progress: student_progress::Model,
}

#[derive(Debug)]
pub struct StudentAnalytics {
    pub student: user::Model,
    pub progress: i32,
    pub enrolled_at: chrono::NaiveDateTime,
}

#[derive(Debug)]
pub struct CourseAnalytics {
    pub course: course::Model,
    pub enrolled_students: usize,
    pub average_progress: f64,
    pub completed_students: usize,
    pub sessions_total: usize,
    pub sessions_completed: usize,
    pub students: Vec<StudentAnalytics>,
}

/// Recomputes the overall percentage from the currently published content
/// and mirrors it into the enrollment row.
pub async fn recompute_progress<C: ConnectionTrait>(
    conn: &C,
    student_id: Uuid,
    course_id: Uuid,
) -> AppResult<student_progress::Model> {
    let progress_repo = ProgressRepository::new(conn);

    let published = LectureRepository::new(conn).count_published(course_id).await?
        + DocumentRepository::new(conn).count_published(course_id).await?;
    let completed = progress_repo
        .count_completed_published_lectures(student_id, course_id)
        .await?
        + progress_repo
            .count_viewed_published_documents(student_id, course_id)
            .await?;
    let overall = overall_progress(completed, published);

    let progress = progress_repo.find_or_create(student_id, course_id).await?;
    let progress = progress_repo.save_overall(progress, overall).await?;
    EnrollmentRepository::new(conn)
        .set_progress(course_id, student_id, overall)
        .await?;

    tracing::debug!(%student_id, %course_id, completed, published, overall, "progress recomputed");
    Ok(progress)
}

async fn authorize_tracking(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
) -> AppResult<course::Model> {
    let course = load_course(db, course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::TrackProgress, &relationship)?;
    Ok(course)
}

pub async fn get_course_progress(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
) -> AppResult<CourseProgress> {
    let course = authorize_tracking(db, actor, course_id).await?;

    let progress = recompute_progress(db, actor.user_id, course.course_id).await?;
    let progress_repo = ProgressRepository::new(db);

    Ok(CourseProgress {
        progress,
        published_lectures: LectureRepository::new(db)
            .count_published(course.course_id)
            .await?,
        published_documents: DocumentRepository::new(db)
            .count_published(course.course_id)
            .await?,
        watches: progress_repo
            .find_watches(actor.user_id, course.course_id)
            .await?,
        views: progress_repo
            .find_views(actor.user_id, course.course_id)
            .await?,
    })
}

pub async fn record_lecture_watch(
    db: &DatabaseConnection,
    actor: &Actor,
    lecture_id: Uuid,
    reported: WatchState,
) -> AppResult<(lecture_watch::Model, student_progress::Model)> {
    let lecture = LectureRepository::new(db)
        .find_by_id(lecture_id)
        .await?
        .filter(|l| l.is_published)
        .ok_or_else(|| AppError::not_found("Lecture"))?;
    authorize_tracking(db, actor, lecture.course_id).await?;

    let txn = db.begin().await?;
    let progress_repo = ProgressRepository::new(&txn);
    let existing = progress_repo.find_watch(actor.user_id, lecture_id).await?;
    let merged = merge_watch(
        existing.as_ref().map(|w| WatchState {
            watch_time: w.watch_time,
            completed: w.completed,
        }),
        reported,
    );
    let watch = progress_repo
        .save_watch(existing, actor.user_id, &lecture, merged)
        .await?;
    let progress = recompute_progress(&txn, actor.user_id, lecture.course_id).await?;
    txn.commit().await?;

    Ok((watch, progress))
}

pub async fn record_document_view(
    db: &DatabaseConnection,
    actor: &Actor,
    document_id: Uuid,
) -> AppResult<(document_view::Model, student_progress::Model)> {
    let document = DocumentRepository::new(db)
        .find_by_id(document_id)
        .await?
        .filter(|d| d.is_published)
        .ok_or_else(|| AppError::not_found("Document"))?;
    authorize_tracking(db, actor, document.course_id).await?;

    let txn = db.begin().await?;
    let view = ProgressRepository::new(&txn)
        .record_view(actor.user_id, &document)
        .await?;
    let progress = recompute_progress(&txn, actor.user_id, document.course_id).await?;
    txn.commit().await?;

    Ok((view, progress))
}

pub async fn my_progress(
    db: &DatabaseConnection,
    actor: &Actor,
) -> AppResult<Vec<StudentCourseProgress>> {
    let progress = ProgressRepository::new(db)
        .find_by_student(actor.user_id)
        .await?;
    let courses: HashMap<Uuid, course::Model> = CourseRepository::new(db)
        .find_by_ids(progress.iter().map(|p| p.course_id).collect())
        .await?
        .into_iter()
        .map(|c| (c.course_id, c))
        .collect();

    Ok(progress
        .into_iter()
        .filter_map(|progress| {
            courses
                .get(&progress.course_id)
                .cloned()
                .map(|course| StudentCourseProgress { course, progress })
        })
        .collect())
}

pub async fn course_analytics(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
) -> AppResult<CourseAnalytics> {
    let course = load_course(db, course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::ViewCourseAnalytics, &relationship)?;

    let enrollments = EnrollmentRepository::new(db)
        .find_by_course(course.course_id)
        .await?;
    let students: HashMap<Uuid, user::Model> = UserRepository::new(db)
        .find_by_ids(enrollments.iter().map(|e| e.student_id).collect())
        .await?
        .into_iter()
        .map(|u| (u.user_id, u))
        .collect();
    let sessions = MentorshipRepository::new(db)
        .find_by_course(course.course_id)
        .await?;

    let average_progress = if enrollments.is_empty() {
        0.0
    } else {
        let total: i64 = enrollments.iter().map(|e| e.progress as i64).sum();
        (total as f64 / enrollments.len() as f64 * 10.0).round() / 10.0
    };

    Ok(CourseAnalytics {
        enrolled_students: enrollments.len(),
        average_progress,
        completed_students: enrollments.iter().filter(|e| e.progress >= 100).count(),
        sessions_total: sessions.len(),
        sessions_completed: sessions
            .iter()
            .filter(|s| s.status == SessionStatusEnum::Completed)
            .count(),
        students: enrollments
            .into_iter()
            .filter_map(|e| {
                students.get(&e.student_id).cloned().map(|student| StudentAnalytics {
                    student,
                    progress: e.progress,
                    enrolled_at: e.enrolled_at,
                })
            })
            .collect(),
        course,
    })
}
