//! Request flows: load the aggregate, authorize, mutate, persist.

pub mod assignment_service;
pub mod auth_service;
pub mod course_service;
pub mod document_service;
pub mod lecture_service;
pub mod mentorship_service;
pub mod progress_service;
pub mod rating_service;
pub mod ta_service;

use sea_orm::{ConnectionTrait, DbErr, SqlErr};
use uuid::Uuid;

use crate::domain::Relationship;
use crate::entities::course;
use crate::error::{AppError, AppResult};
use crate::repositories::{CourseRepository, CourseTaRepository, EnrollmentRepository};

pub(crate) async fn load_course<C: ConnectionTrait>(
    conn: &C,
    course_id: Uuid,
) -> AppResult<course::Model> {
    CourseRepository::new(conn)
        .find_by_id(course_id)
        .await?
        .ok_or_else(|| AppError::not_found("Course"))
}

/// Loads the caller's enrollment and TA rows for the course.
pub(crate) async fn course_relationship<C: ConnectionTrait>(
    conn: &C,
    course: &course::Model,
    user_id: Uuid,
) -> AppResult<Relationship> {
    let enrollment = EnrollmentRepository::new(conn)
        .find(course.course_id, user_id)
        .await?;
    let ta = CourseTaRepository::new(conn)
        .find(course.course_id, user_id)
        .await?;

    Ok(Relationship::for_course(
        course,
        user_id,
        enrollment.as_ref(),
        ta.as_ref(),
    ))
}

/// Maps a unique-key violation to a conflict carrying `message`.
pub(crate) fn conflict_on_duplicate(err: DbErr, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(message.to_string()),
        _ => AppError::Database(err),
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}
