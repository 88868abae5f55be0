use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::load_course;
use crate::domain::rating::{CriteriaScores, RatingSummary, summarize};
use crate::domain::{Action, Actor, Relationship, authorize};
use crate::entities::industry_rating;
use crate::error::{AppError, AppResult};
use crate::repositories::IndustryRatingRepository;

#[derive(Debug)]
pub struct CourseRatings {
    pub course_id: Uuid,
    pub summary: RatingSummary,
    pub ratings: Vec<industry_rating::Model>,
}

/// Records the caller's rating of a published course, replacing an earlier
/// one.
pub async fn rate_course(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
    scores: CriteriaScores,
    feedback: Option<String>,
) -> AppResult<industry_rating::Model> {
    let course = load_course(db, course_id).await?;
    authorize(actor, Action::RateCourse, &Relationship::default())?;
    if !course.is_published {
        return Err(AppError::not_found("Course"));
    }
    scores.validate()?;

    let rating = IndustryRatingRepository::new(db)
        .upsert(course.course_id, actor.user_id, scores, feedback)
        .await?;

    tracing::info!(course_id = %course_id, expert_id = %actor.user_id, overall = scores.overall, "course rated");
    Ok(rating)
}

pub async fn course_ratings(db: &DatabaseConnection, course_id: Uuid) -> AppResult<CourseRatings> {
    let course = load_course(db, course_id).await?;
    let ratings = IndustryRatingRepository::new(db)
        .find_by_course(course.course_id)
        .await?;

    Ok(CourseRatings {
        course_id: course.course_id,
        summary: summarize(&ratings),
        ratings,
    })
}
