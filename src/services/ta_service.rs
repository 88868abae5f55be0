use std::collections::{HashMap, HashSet};

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use super::auth_service::hash_password;
use super::{course_relationship, load_course};
use crate::config::PLACEHOLDER_PASSWORD_LENGTH;
use crate::domain::access::role_allows;
use crate::domain::rating::average_rating;
use crate::domain::ta::{TaAccountPlan, plan_ta_account};
use crate::domain::{Action, Actor, authorize};
use crate::entities::sea_orm_active_enums::{RoleEnum, SessionStatusEnum};
use crate::entities::{course, course_ta, mentorship_session, user};
use crate::error::{AppError, AppResult};
use crate::repositories::{
    CourseRepository, CourseTaRepository, EnrollmentRepository, MentorshipRepository,
    UserRepository,
};
use crate::utils::random::generate_random_string;

#[derive(Debug)]
pub struct TaAssignmentRequest {
    pub course_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub student_ids: Vec<Uuid>,
}

#[derive(Debug)]
pub struct TaAssignment {
    pub ta: user::Model,
    pub course_ta: course_ta::Model,
    pub assigned_students: Vec<Uuid>,
    pub account_created: bool,
}

#[derive(Debug)]
pub struct TaCourse {
    pub course: course::Model,
    pub assigned_at: chrono::NaiveDateTime,
    pub assigned_students: Vec<Uuid>,
}

#[derive(Debug)]
pub struct TaOverview {
    pub ta: user::Model,
    pub courses: Vec<TaCourse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionStats {
    pub total: usize,
    pub scheduled: usize,
    pub ongoing: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub average_rating: Option<f64>,
}

#[derive(Debug)]
pub struct TaDetail {
    pub overview: TaOverview,
    pub sessions: Vec<mentorship_session::Model>,
    pub stats: SessionStats,
}

pub fn session_stats(sessions: &[mentorship_session::Model]) -> SessionStats {
    let count = |status: SessionStatusEnum| sessions.iter().filter(|s| s.status == status).count();
    SessionStats {
        total: sessions.len(),
        scheduled: count(SessionStatusEnum::Scheduled),
        ongoing: count(SessionStatusEnum::Ongoing),
        completed: count(SessionStatusEnum::Completed),
        cancelled: count(SessionStatusEnum::Cancelled),
        average_rating: average_rating(sessions.iter().filter_map(|s| s.rating)),
    }
}

fn require_manager(actor: &Actor) -> AppResult<()> {
    if !role_allows(actor.role, Action::ManageTas) {
        return Err(AppError::Forbidden(format!(
            "Role {} is not allowed to {}",
            actor.role.as_str(),
            Action::ManageTas
        )));
    }
    Ok(())
}

async fn load_managed_course(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
) -> AppResult<course::Model> {
    let course = load_course(db, course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::ManageTas, &relationship)?;
    Ok(course)
}

/// Rejects students that are not enrolled, and the TA itself, then drops
/// duplicates.
async fn enrolled_subset<C: ConnectionTrait>(
    conn: &C,
    course_id: Uuid,
    ta_id: Uuid,
    student_ids: Vec<Uuid>,
) -> AppResult<Vec<Uuid>> {
    let enrolled: HashSet<Uuid> = EnrollmentRepository::new(conn)
        .find_by_course(course_id)
        .await?
        .into_iter()
        .map(|e| e.student_id)
        .collect();

    let mut seen = HashSet::new();
    let mut subset = Vec::with_capacity(student_ids.len());
    for student_id in student_ids {
        if student_id == ta_id {
            return Err(AppError::Validation(
                "A TA cannot be assigned as their own student".to_string(),
            ));
        }
        if !enrolled.contains(&student_id) {
            return Err(AppError::Validation(format!(
                "Student {student_id} is not enrolled in this course"
            )));
        }
        if seen.insert(student_id) {
            subset.push(student_id);
        }
    }
    Ok(subset)
}

/// Assigns a TA to a course by email.
///
/// An unknown email gets a fresh `ta` account with a random placeholder
/// password, a student is promoted to `ta`. Assigning the same TA again
/// replaces the assigned-student subset.
pub async fn assign_ta(
    db: &DatabaseConnection,
    actor: &Actor,
    request: TaAssignmentRequest,
) -> AppResult<TaAssignment> {
    let course = load_managed_course(db, actor, request.course_id).await?;
    let email = request.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }
    let txn = db.begin().await?;
    let user_repo = UserRepository::new(&txn);

    let existing = user_repo.find_by_email(&email).await?;
    let (ta, account_created) = match plan_ta_account(existing.as_ref())? {
        TaAccountPlan::Materialise => {
            let placeholder = generate_random_string(PLACEHOLDER_PASSWORD_LENGTH);
            let name = request
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| email.split('@').next().unwrap_or(&email).to_string());
            let ta = user_repo
                .create(name, email.clone(), hash_password(&placeholder)?, RoleEnum::Ta)
                .await?;
            tracing::warn!(
                user_id = %ta.user_id,
                email = %email,
                "created TA account with a placeholder password, a password reset is required"
            );
            (ta, true)
        }
        TaAccountPlan::Promote(user_id) => {
            let ta = user_repo.set_role(user_id, RoleEnum::Ta).await?;
            tracing::info!(user_id = %user_id, "student promoted to TA");
            (ta, false)
        }
        TaAccountPlan::Keep(user_id) => {
            let ta = user_repo
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| AppError::not_found("User"))?;
            (ta, false)
        }
    };

    let students = enrolled_subset(&txn, course.course_id, ta.user_id, request.student_ids).await?;
    let course_ta_repo = CourseTaRepository::new(&txn);
    let course_ta = course_ta_repo.ensure(course.course_id, ta.user_id).await?;
    course_ta_repo
        .replace_students(course.course_id, ta.user_id, &students)
        .await?;
    txn.commit().await?;

    tracing::info!(course_id = %course.course_id, ta_id = %ta.user_id, students = students.len(), "TA assigned");
    Ok(TaAssignment {
        ta,
        course_ta,
        assigned_students: students,
        account_created,
    })
}

pub async fn remove_ta(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
    ta_id: Uuid,
) -> AppResult<()> {
    let course = load_managed_course(db, actor, course_id).await?;

    let txn = db.begin().await?;
    let course_ta_repo = CourseTaRepository::new(&txn);
    if course_ta_repo.find(course.course_id, ta_id).await?.is_none() {
        return Err(AppError::not_found("TA assignment"));
    }
    course_ta_repo.remove(course.course_id, ta_id).await?;
    txn.commit().await?;

    tracing::info!(course_id = %course_id, ta_id = %ta_id, "TA removed from course");
    Ok(())
}

pub async fn update_ta_students(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
    ta_id: Uuid,
    student_ids: Vec<Uuid>,
) -> AppResult<Vec<Uuid>> {
    let course = load_managed_course(db, actor, course_id).await?;

    let txn = db.begin().await?;
    let course_ta_repo = CourseTaRepository::new(&txn);
    if course_ta_repo.find(course.course_id, ta_id).await?.is_none() {
        return Err(AppError::not_found("TA assignment"));
    }
    let students = enrolled_subset(&txn, course.course_id, ta_id, student_ids).await?;
    course_ta_repo
        .replace_students(course.course_id, ta_id, &students)
        .await?;
    txn.commit().await?;

    Ok(students)
}

/// Enrolled students of the course not yet assigned to any of its TAs.
pub async fn available_students(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
) -> AppResult<Vec<user::Model>> {
    let course = load_managed_course(db, actor, course_id).await?;

    let course_ta_repo = CourseTaRepository::new(db);
    let mut assigned = HashSet::new();
    for row in course_ta_repo.find_by_course(course.course_id).await? {
        assigned.extend(
            course_ta_repo
                .assigned_students(course.course_id, row.ta_id)
                .await?,
        );
    }

    let available: Vec<Uuid> = EnrollmentRepository::new(db)
        .find_by_course(course.course_id)
        .await?
        .into_iter()
        .map(|e| e.student_id)
        .filter(|id| !assigned.contains(id))
        .collect();

    Ok(UserRepository::new(db).find_by_ids(available).await?)
}

/// Every TA working in one of the caller's courses, grouped by TA.
pub async fn list_tas(db: &DatabaseConnection, actor: &Actor) -> AppResult<Vec<TaOverview>> {
    require_manager(actor)?;

    let courses: HashMap<Uuid, course::Model> = CourseRepository::new(db)
        .find_by_educator(actor.user_id)
        .await?
        .into_iter()
        .map(|c| (c.course_id, c))
        .collect();
    let course_ta_repo = CourseTaRepository::new(db);
    let rows = course_ta_repo
        .find_by_courses(courses.keys().copied().collect())
        .await?;

    let ta_ids: Vec<Uuid> = rows
        .iter()
        .map(|r| r.ta_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let tas = UserRepository::new(db).find_by_ids(ta_ids).await?;

    let mut overviews = Vec::with_capacity(tas.len());
    for ta in tas {
        let mut ta_courses = Vec::new();
        for row in rows.iter().filter(|r| r.ta_id == ta.user_id) {
            let Some(course) = courses.get(&row.course_id) else {
                continue;
            };
            ta_courses.push(TaCourse {
                course: course.clone(),
                assigned_at: row.assigned_at,
                assigned_students: course_ta_repo
                    .assigned_students(row.course_id, ta.user_id)
                    .await?,
            });
        }
        overviews.push(TaOverview {
            ta,
            courses: ta_courses,
        });
    }
    Ok(overviews)
}

/// A TA's assignments within the caller's courses, with session statistics.
pub async fn ta_detail(db: &DatabaseConnection, actor: &Actor, ta_id: Uuid) -> AppResult<TaDetail> {
    require_manager(actor)?;

    let overview = list_tas(db, actor)
        .await?
        .into_iter()
        .find(|o| o.ta.user_id == ta_id)
        .ok_or_else(|| AppError::not_found("TA"))?;

    let mentorship_repo = MentorshipRepository::new(db);
    let mut sessions = Vec::new();
    for ta_course in &overview.courses {
        sessions.extend(
            mentorship_repo
                .find_by_ta_in_course(ta_id, ta_course.course.course_id)
                .await?,
        );
    }
    sessions.sort_by_key(|s| s.scheduled_at);

    Ok(TaDetail {
        stats: session_stats(&sessions),
        overview,
        sessions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session(status: SessionStatusEnum, rating: Option<i16>) -> mentorship_session::Model {
        let now = Utc::now().naive_utc();
        mentorship_session::Model {
            session_id: Uuid::new_v4(),
            ta_id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            title: "Review".to_string(),
            description: None,
            scheduled_at: now,
            duration_minutes: 60,
            meeting_link: None,
            status,
            notes: None,
            rating,
            rating_feedback: None,
            rated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_session_stats() {
        let sessions = vec![
            session(SessionStatusEnum::Completed, Some(5)),
            session(SessionStatusEnum::Completed, Some(4)),
            session(SessionStatusEnum::Scheduled, None),
            session(SessionStatusEnum::Cancelled, None),
        ];
        let stats = session_stats(&sessions);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.scheduled, 1);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.ongoing, 0);
        assert_eq!(stats.average_rating, Some(4.5));
    }

    #[test]
    fn test_session_stats_empty() {
        assert_eq!(session_stats(&[]), SessionStats::default());
    }
}
