use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use super::{course_relationship, load_course, require_text};
use crate::domain::ordering::{next_sort_order, plan_reorder};
use crate::domain::publish::Visibility;
use crate::domain::{Action, Actor, authorize};
use crate::entities::{course, lecture};
use crate::error::{AppError, AppResult};
use crate::repositories::{LectureRepository, LectureUpdate};

#[derive(Debug)]
pub struct NewLecture {
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub duration: i32,
}

fn check_duration(duration: i32) -> AppResult<()> {
    if duration < 0 {
        return Err(AppError::Validation(
            "Duration cannot be negative".to_string(),
        ));
    }
    Ok(())
}

async fn load_lecture(db: &DatabaseConnection, lecture_id: Uuid) -> AppResult<lecture::Model> {
    LectureRepository::new(db)
        .find_by_id(lecture_id)
        .await?
        .ok_or_else(|| AppError::not_found("Lecture"))
}

/// Loads the lecture and its course and checks that the caller manages the
/// course content.
async fn load_for_management(
    db: &DatabaseConnection,
    actor: &Actor,
    lecture_id: Uuid,
) -> AppResult<(lecture::Model, course::Model)> {
    let lecture = load_lecture(db, lecture_id).await?;
    let course = load_course(db, lecture.course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::ManageContent, &relationship)?;
    Ok((lecture, course))
}

pub async fn create_lecture(
    db: &DatabaseConnection,
    actor: &Actor,
    new_lecture: NewLecture,
) -> AppResult<lecture::Model> {
    let course = load_course(db, new_lecture.course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::ManageContent, &relationship)?;
    require_text("Title", &new_lecture.title)?;
    check_duration(new_lecture.duration)?;

    let lecture_repo = LectureRepository::new(db);
    let sort_order = next_sort_order(lecture_repo.max_sort_order(course.course_id).await?);
    let lecture = lecture_repo
        .create(
            course.course_id,
            new_lecture.title.trim().to_string(),
            new_lecture.description,
            new_lecture.video_url,
            new_lecture.duration,
            sort_order,
        )
        .await?;

    tracing::info!(lecture_id = %lecture.lecture_id, course_id = %course.course_id, "lecture created");
    Ok(lecture)
}

/// Lectures of a course in manual order. Drafts are only listed for the
/// owning educator and assigned TAs.
pub async fn list_lectures(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
) -> AppResult<Vec<lecture::Model>> {
    let course = load_course(db, course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    let published_only = authorize(actor, Action::ViewDraftContent, &relationship).is_err();

    if published_only && !course.is_published {
        return Err(AppError::not_found("Course"));
    }

    Ok(LectureRepository::new(db)
        .find_by_course(course.course_id, published_only)
        .await?)
}

pub async fn get_lecture(
    db: &DatabaseConnection,
    actor: &Actor,
    lecture_id: Uuid,
) -> AppResult<lecture::Model> {
    let lecture = load_lecture(db, lecture_id).await?;
    if lecture.is_published {
        return Ok(lecture);
    }

    let course = load_course(db, lecture.course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    if authorize(actor, Action::ViewDraftContent, &relationship).is_err() {
        return Err(AppError::not_found("Lecture"));
    }
    Ok(lecture)
}

pub async fn update_lecture(
    db: &DatabaseConnection,
    actor: &Actor,
    lecture_id: Uuid,
    updates: LectureUpdate,
) -> AppResult<lecture::Model> {
    let (lecture, _) = load_for_management(db, actor, lecture_id).await?;
    if let Some(title) = &updates.title {
        require_text("Title", title)?;
    }
    if let Some(duration) = updates.duration {
        check_duration(duration)?;
    }

    Ok(LectureRepository::new(db).update(lecture, updates).await?)
}

pub async fn delete_lecture(db: &DatabaseConnection, actor: &Actor, lecture_id: Uuid) -> AppResult<()> {
    let (lecture, _) = load_for_management(db, actor, lecture_id).await?;

    let txn = db.begin().await?;
    LectureRepository::new(&txn).delete(lecture.lecture_id).await?;
    txn.commit().await?;

    tracing::info!(lecture_id = %lecture_id, "lecture deleted");
    Ok(())
}

pub async fn toggle_publish(
    db: &DatabaseConnection,
    actor: &Actor,
    lecture_id: Uuid,
) -> AppResult<lecture::Model> {
    let (lecture, _) = load_for_management(db, actor, lecture_id).await?;
    let visibility = Visibility::from(lecture.is_published).toggled();
    Ok(LectureRepository::new(db)
        .set_published(lecture, visibility.is_published())
        .await?)
}

/// Gives the listed lectures `sort_order = position + 1`. Lectures left out
/// keep their order.
pub async fn reorder_lectures(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
    lecture_ids: Vec<Uuid>,
) -> AppResult<Vec<lecture::Model>> {
    let course = load_course(db, course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::ManageContent, &relationship)?;

    let txn = db.begin().await?;
    let lecture_repo = LectureRepository::new(&txn);
    let plan = plan_reorder(&lecture_repo.ids_by_course(course.course_id).await?, &lecture_ids)?;
    for (lecture_id, sort_order) in plan {
        lecture_repo.set_sort_order(lecture_id, sort_order).await?;
    }
    let lectures = lecture_repo.find_by_course(course.course_id, false).await?;
    txn.commit().await?;

    Ok(lectures)
}
