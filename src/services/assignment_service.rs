use chrono::{NaiveDateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use super::{conflict_on_duplicate, course_relationship, load_course, require_text};
use crate::domain::publish::Visibility;
use crate::domain::submission::{
    SubmissionState, check_grade, check_max_marks_change, check_submit, validate_max_marks,
};
use crate::domain::{Action, Actor, authorize};
use crate::entities::{assignment, assignment_submission, course, user};
use crate::error::{AppError, AppResult};
use crate::repositories::{AssignmentRepository, AssignmentUpdate, UserRepository};

#[derive(Debug)]
pub struct NewAssignment {
    pub course_id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDateTime,
    pub max_marks: i32,
}

#[derive(Debug)]
pub struct SubmissionWithStudent {
    pub submission: assignment_submission::Model,
    pub student: Option<user::Model>,
}

async fn load_assignment(
    db: &DatabaseConnection,
    assignment_id: Uuid,
) -> AppResult<(assignment::Model, course::Model)> {
    let assignment = AssignmentRepository::new(db)
        .find_by_id(assignment_id)
        .await?
        .ok_or_else(|| AppError::not_found("Assignment"))?;
    let course = load_course(db, assignment.course_id).await?;
    Ok((assignment, course))
}

async fn load_for_action(
    db: &DatabaseConnection,
    actor: &Actor,
    assignment_id: Uuid,
    action: Action,
) -> AppResult<assignment::Model> {
    let (assignment, course) = load_assignment(db, assignment_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, action, &relationship)?;
    Ok(assignment)
}

pub async fn create_assignment(
    db: &DatabaseConnection,
    actor: &Actor,
    new_assignment: NewAssignment,
) -> AppResult<assignment::Model> {
    let course = load_course(db, new_assignment.course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::ManageContent, &relationship)?;
    require_text("Title", &new_assignment.title)?;
    validate_max_marks(new_assignment.max_marks)?;

    let assignment = AssignmentRepository::new(db)
        .create(
            course.course_id,
            new_assignment.title.trim().to_string(),
            new_assignment.description,
            new_assignment.due_date,
            new_assignment.max_marks,
        )
        .await?;

    tracing::info!(assignment_id = %assignment.assignment_id, course_id = %course.course_id, "assignment created");
    Ok(assignment)
}

pub async fn list_assignments(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
) -> AppResult<Vec<assignment::Model>> {
    let course = load_course(db, course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    let published_only = authorize(actor, Action::ViewDraftContent, &relationship).is_err();

    if published_only && !course.is_published {
        return Err(AppError::not_found("Course"));
    }

    Ok(AssignmentRepository::new(db)
        .find_by_course(course.course_id, published_only)
        .await?)
}

/// The assignment, plus the caller's own submission when the caller has one.
pub async fn get_assignment(
    db: &DatabaseConnection,
    actor: &Actor,
    assignment_id: Uuid,
) -> AppResult<(assignment::Model, Option<assignment_submission::Model>)> {
    let (assignment, course) = load_assignment(db, assignment_id).await?;

    if !assignment.is_published {
        let relationship = course_relationship(db, &course, actor.user_id).await?;
        if authorize(actor, Action::ViewDraftContent, &relationship).is_err() {
            return Err(AppError::not_found("Assignment"));
        }
    }

    let submission = AssignmentRepository::new(db)
        .find_submission(assignment.assignment_id, actor.user_id)
        .await?;
    Ok((assignment, submission))
}

pub async fn update_assignment(
    db: &DatabaseConnection,
    actor: &Actor,
    assignment_id: Uuid,
    updates: AssignmentUpdate,
) -> AppResult<assignment::Model> {
    let assignment = load_for_action(db, actor, assignment_id, Action::ManageContent).await?;
    if let Some(title) = &updates.title {
        require_text("Title", title)?;
    }
    let assignment_repo = AssignmentRepository::new(db);
    if let Some(max_marks) = updates.max_marks {
        let submissions = assignment_repo
            .find_submissions(assignment.assignment_id)
            .await?;
        check_max_marks_change(max_marks, &submissions)?;
    }

    Ok(assignment_repo.update(assignment, updates).await?)
}

pub async fn delete_assignment(
    db: &DatabaseConnection,
    actor: &Actor,
    assignment_id: Uuid,
) -> AppResult<()> {
    let assignment = load_for_action(db, actor, assignment_id, Action::ManageContent).await?;

    let txn = db.begin().await?;
    AssignmentRepository::new(&txn)
        .delete(assignment.assignment_id)
        .await?;
    txn.commit().await?;

    tracing::info!(assignment_id = %assignment_id, "assignment deleted");
    Ok(())
}

pub async fn toggle_publish(
    db: &DatabaseConnection,
    actor: &Actor,
    assignment_id: Uuid,
) -> AppResult<assignment::Model> {
    let assignment = load_for_action(db, actor, assignment_id, Action::ManageContent).await?;
    let visibility = Visibility::from(assignment.is_published).toggled();
    Ok(AssignmentRepository::new(db)
        .set_published(assignment, visibility.is_published())
        .await?)
}

/// Submits or resubmits the caller's files. Resubmitting replaces the files
/// until the submission is graded.
pub async fn submit(
    db: &DatabaseConnection,
    actor: &Actor,
    assignment_id: Uuid,
    files: Vec<String>,
) -> AppResult<assignment_submission::Model> {
    let assignment = load_for_action(db, actor, assignment_id, Action::SubmitAssignment).await?;

    let files: Vec<String> = files
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();
    if files.is_empty() {
        return Err(AppError::Validation(
            "At least one file is required".to_string(),
        ));
    }

    let assignment_repo = AssignmentRepository::new(db);
    let existing = assignment_repo
        .find_submission(assignment.assignment_id, actor.user_id)
        .await?;
    check_submit(
        &assignment,
        SubmissionState::of(existing.as_ref()),
        Utc::now().naive_utc(),
    )?;

    let submission = assignment_repo
        .upsert_submission(existing, assignment.assignment_id, actor.user_id, files)
        .await
        .map_err(|e| conflict_on_duplicate(e, "Submission already exists"))?;

    tracing::info!(assignment_id = %assignment_id, student_id = %actor.user_id, "assignment submitted");
    Ok(submission)
}

/// Grades a student's submission. Works after the deadline and overwrites a
/// previous grade.
pub async fn grade(
    db: &DatabaseConnection,
    actor: &Actor,
    assignment_id: Uuid,
    student_id: Uuid,
    marks: i32,
    feedback: Option<String>,
) -> AppResult<assignment_submission::Model> {
    let assignment = load_for_action(db, actor, assignment_id, Action::GradeSubmission).await?;

    let assignment_repo = AssignmentRepository::new(db);
    let existing = assignment_repo
        .find_submission(assignment.assignment_id, student_id)
        .await?;
    check_grade(&assignment, SubmissionState::of(existing.as_ref()), marks)?;
    let submission = existing.ok_or_else(|| AppError::not_found("Submission"))?;

    let graded = assignment_repo
        .grade_submission(submission, marks, feedback, actor.user_id)
        .await?;

    tracing::info!(assignment_id = %assignment_id, student_id = %student_id, marks, "submission graded");
    Ok(graded)
}

pub async fn list_submissions(
    db: &DatabaseConnection,
    actor: &Actor,
    assignment_id: Uuid,
) -> AppResult<Vec<SubmissionWithStudent>> {
    let assignment = load_for_action(db, actor, assignment_id, Action::ViewSubmissions).await?;

    let submissions = AssignmentRepository::new(db)
        .find_submissions(assignment.assignment_id)
        .await?;
    let students = UserRepository::new(db)
        .find_by_ids(submissions.iter().map(|s| s.student_id).collect())
        .await?;

    Ok(submissions
        .into_iter()
        .map(|submission| {
            let student = students
                .iter()
                .find(|u| u.user_id == submission.student_id)
                .cloned();
            SubmissionWithStudent {
                submission,
                student,
            }
        })
        .collect())
}
