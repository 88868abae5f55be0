use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use super::{conflict_on_duplicate, course_relationship, load_course, require_text};
use crate::domain::publish::Visibility;
use crate::domain::{Action, Actor, Relationship, authorize};
use crate::entities::sea_orm_active_enums::{DifficultyEnum, RoleEnum};
use crate::entities::{course, course_enrollment, user};
use crate::error::{AppError, AppResult};
use crate::repositories::{
    CourseFilter, CourseRepository, CourseTaRepository, CourseUpdate, EnrollmentRepository,
    ProgressRepository, UserRepository,
};

#[derive(Debug)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: DifficultyEnum,
    pub thumbnail: Option<String>,
}

#[derive(Debug)]
pub struct CourseDetail {
    pub course: course::Model,
    pub educator: Option<user::Model>,
    pub enrollment_count: usize,
    pub relationship: Relationship,
}

pub async fn create_course(
    db: &DatabaseConnection,
    actor: &Actor,
    new_course: NewCourse,
) -> AppResult<course::Model> {
    authorize(actor, Action::CreateCourse, &Relationship::default())?;
    require_text("Title", &new_course.title)?;
    require_text("Category", &new_course.category)?;

    let course = CourseRepository::new(db)
        .create(
            actor.user_id,
            new_course.title.trim().to_string(),
            new_course.description,
            new_course.category.trim().to_string(),
            new_course.difficulty,
            new_course.thumbnail,
        )
        .await?;

    tracing::info!(course_id = %course.course_id, educator_id = %actor.user_id, "course created");
    Ok(course)
}

/// Published courses, plus the caller's own drafts when the caller is an
/// educator.
pub async fn list_courses(
    db: &DatabaseConnection,
    actor: &Actor,
    filter: CourseFilter,
) -> AppResult<Vec<course::Model>> {
    let owner_id = (actor.role == RoleEnum::Educator).then_some(actor.user_id);
    Ok(CourseRepository::new(db).find_visible(filter, owner_id).await?)
}

pub async fn get_course(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
) -> AppResult<CourseDetail> {
    let course = load_course(db, course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;

    if !course.is_published && authorize(actor, Action::ViewDraftContent, &relationship).is_err()
    {
        return Err(AppError::not_found("Course"));
    }

    let educator = UserRepository::new(db).find_by_id(course.educator_id).await?;
    let enrollment_count = EnrollmentRepository::new(db)
        .find_by_course(course.course_id)
        .await?
        .len();

    Ok(CourseDetail {
        course,
        educator,
        enrollment_count,
        relationship,
    })
}

/// Applies `updates` when the stored revision still matches.
///
/// `expected_revision` lets a client detect that someone else edited the
/// course since it was read; without it the revision read here is used.
pub async fn update_course(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
    updates: CourseUpdate,
    expected_revision: Option<i32>,
) -> AppResult<course::Model> {
    let course = load_course(db, course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::EditCourse, &relationship)?;

    if let Some(title) = &updates.title {
        require_text("Title", title)?;
    }
    if let Some(category) = &updates.category {
        require_text("Category", category)?;
    }
    if expected_revision.is_some_and(|expected| expected != course.revision) {
        return Err(stale_revision());
    }

    CourseRepository::new(db)
        .update(course, updates)
        .await?
        .ok_or_else(stale_revision)
}

pub async fn toggle_publish(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
) -> AppResult<course::Model> {
    let course = load_course(db, course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::EditCourse, &relationship)?;

    let visibility = Visibility::from(course.is_published).toggled();
    let course = CourseRepository::new(db)
        .set_published(course, visibility.is_published())
        .await?
        .ok_or_else(stale_revision)?;

    tracing::info!(course_id = %course.course_id, is_published = course.is_published, "course publish state changed");
    Ok(course)
}

pub async fn delete_course(db: &DatabaseConnection, actor: &Actor, course_id: Uuid) -> AppResult<()> {
    let course = load_course(db, course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::EditCourse, &relationship)?;

    let txn = db.begin().await?;
    CourseRepository::new(&txn).delete_cascade(course.course_id).await?;
    txn.commit().await?;

    tracing::info!(course_id = %course_id, "course deleted");
    Ok(())
}

pub async fn enroll(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
) -> AppResult<course_enrollment::Model> {
    let course = load_course(db, course_id).await?;
    if !course.is_published {
        return Err(AppError::not_found("Course"));
    }
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::Enroll, &relationship)?;

    let txn = db.begin().await?;
    let enrollment = EnrollmentRepository::new(&txn)
        .create(course.course_id, actor.user_id)
        .await
        .map_err(|e| conflict_on_duplicate(e, "Already enrolled in this course"))?;
    ProgressRepository::new(&txn)
        .find_or_create(actor.user_id, course.course_id)
        .await?;
    txn.commit().await?;

    tracing::info!(course_id = %course_id, student_id = %actor.user_id, "student enrolled");
    Ok(enrollment)
}

/// Courses the caller teaches, studies, or assists in.
pub async fn my_courses(db: &DatabaseConnection, actor: &Actor) -> AppResult<Vec<course::Model>> {
    let course_repo = CourseRepository::new(db);

    let course_ids: Vec<Uuid> = match actor.role {
        RoleEnum::Educator => return Ok(course_repo.find_by_educator(actor.user_id).await?),
        RoleEnum::Student => EnrollmentRepository::new(db)
            .find_by_student(actor.user_id)
            .await?
            .into_iter()
            .map(|e| e.course_id)
            .collect(),
        RoleEnum::Ta => CourseTaRepository::new(db)
            .find_by_ta(actor.user_id)
            .await?
            .into_iter()
            .map(|t| t.course_id)
            .collect(),
        RoleEnum::IndustryExpert => Vec::new(),
    };

    Ok(course_repo.find_by_ids(course_ids).await?)
}

fn stale_revision() -> AppError {
    AppError::Conflict("Course was modified by another request, reload and retry".to_string())
}
