use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::{course_relationship, load_course, require_text};
use crate::domain::availability::{Slot, free_slots};
use crate::domain::mentorship::{
    SessionEvent, check_editable, check_rating, event_for_target, transition,
};
use crate::domain::{Action, Actor, Relationship, authorize};
use crate::entities::mentorship_session;
use crate::entities::sea_orm_active_enums::{RoleEnum, SessionStatusEnum};
use crate::error::{AppError, AppResult};
use crate::repositories::{
    CourseTaRepository, EnrollmentRepository, MentorshipRepository, NewSession, SessionUpdate,
    UserRepository,
};

#[derive(Debug)]
pub struct SessionRequest {
    pub course_id: Uuid,
    /// The other participant: a student when a TA books, a TA when a
    /// student books.
    pub participant_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: NaiveDateTime,
    pub duration_minutes: i32,
    pub meeting_link: Option<String>,
}

#[derive(Debug)]
pub struct SessionChanges {
    pub update: SessionUpdate,
    pub status: Option<SessionStatusEnum>,
}

#[derive(Debug)]
pub struct Availability {
    pub date: NaiveDate,
    pub booked: Vec<mentorship_session::Model>,
    pub free_slots: Vec<Slot>,
}

fn check_schedule(scheduled_at: Option<NaiveDateTime>, duration: Option<i32>) -> AppResult<()> {
    if scheduled_at.is_some_and(|at| at <= Utc::now().naive_utc()) {
        return Err(AppError::Validation(
            "Session must be scheduled in the future".to_string(),
        ));
    }
    if duration.is_some_and(|minutes| minutes <= 0) {
        return Err(AppError::Validation(
            "Duration must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

async fn load_session(
    db: &DatabaseConnection,
    session_id: Uuid,
) -> AppResult<mentorship_session::Model> {
    MentorshipRepository::new(db)
        .find_by_id(session_id)
        .await?
        .ok_or_else(|| AppError::not_found("Mentorship session"))
}

/// Loads the session and checks `action` against the caller's part in it.
async fn load_for_action(
    db: &DatabaseConnection,
    actor: &Actor,
    session_id: Uuid,
    action: Action,
) -> AppResult<mentorship_session::Model> {
    let session = load_session(db, session_id).await?;
    let relationship = Relationship::default().with_session(&session, actor.user_id);
    authorize(actor, action, &relationship)?;
    Ok(session)
}

pub async fn create_session(
    db: &DatabaseConnection,
    actor: &Actor,
    request: SessionRequest,
) -> AppResult<mentorship_session::Model> {
    let course = load_course(db, request.course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::ScheduleSession, &relationship)?;
    require_text("Title", &request.title)?;
    check_schedule(Some(request.scheduled_at), Some(request.duration_minutes))?;
    if request.participant_id == actor.user_id {
        return Err(AppError::Validation(
            "A session needs two different participants".to_string(),
        ));
    }

    let (ta_id, student_id) = match actor.role {
        RoleEnum::Ta => (actor.user_id, request.participant_id),
        _ => (request.participant_id, actor.user_id),
    };

    let student_enrolled = EnrollmentRepository::new(db)
        .find(course.course_id, student_id)
        .await?
        .is_some();
    if !student_enrolled {
        return Err(AppError::Validation(
            "Student is not enrolled in this course".to_string(),
        ));
    }
    let ta_assigned = CourseTaRepository::new(db)
        .find(course.course_id, ta_id)
        .await?
        .is_some();
    if !ta_assigned {
        return Err(AppError::Validation(
            "TA is not assigned to this course".to_string(),
        ));
    }

    let session = MentorshipRepository::new(db)
        .create(NewSession {
            ta_id,
            student_id,
            course_id: course.course_id,
            title: request.title.trim().to_string(),
            description: request.description,
            scheduled_at: request.scheduled_at,
            duration_minutes: request.duration_minutes,
            meeting_link: request.meeting_link,
        })
        .await?;

    tracing::info!(session_id = %session.session_id, %ta_id, %student_id, "mentorship session scheduled");
    Ok(session)
}

pub async fn my_sessions(
    db: &DatabaseConnection,
    actor: &Actor,
    status: Option<SessionStatusEnum>,
) -> AppResult<Vec<mentorship_session::Model>> {
    Ok(MentorshipRepository::new(db)
        .find_for_user(actor.user_id, status)
        .await?)
}

pub async fn course_sessions(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
) -> AppResult<Vec<mentorship_session::Model>> {
    let course = load_course(db, course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::ViewCourseSessions, &relationship)?;

    Ok(MentorshipRepository::new(db)
        .find_by_course(course.course_id)
        .await?)
}

/// Visible to both participants and to whoever oversees the course's
/// sessions.
pub async fn get_session(
    db: &DatabaseConnection,
    actor: &Actor,
    session_id: Uuid,
) -> AppResult<mentorship_session::Model> {
    let session = load_session(db, session_id).await?;
    if session.ta_id == actor.user_id || session.student_id == actor.user_id {
        return Ok(session);
    }

    let course = load_course(db, session.course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::ViewCourseSessions, &relationship)?;
    Ok(session)
}

pub async fn update_session(
    db: &DatabaseConnection,
    actor: &Actor,
    session_id: Uuid,
    changes: SessionChanges,
) -> AppResult<mentorship_session::Model> {
    let session = load_for_action(db, actor, session_id, Action::EditSession).await?;
    check_editable(session.status)?;
    if let Some(title) = &changes.update.title {
        require_text("Title", title)?;
    }
    check_schedule(changes.update.scheduled_at, changes.update.duration_minutes)?;

    let next_status = match changes.status {
        Some(target) if target != session.status => {
            let event = event_for_target(target)?;
            let action = match event {
                SessionEvent::Start | SessionEvent::Complete => Action::ProgressSession,
                SessionEvent::Cancel => Action::CancelSession,
            };
            let relationship = Relationship::default().with_session(&session, actor.user_id);
            authorize(actor, action, &relationship)?;
            Some(transition(session.status, event)?)
        }
        _ => None,
    };

    let mentorship_repo = MentorshipRepository::new(db);
    let session = mentorship_repo.update(session, changes.update).await?;
    match next_status {
        Some(status) => Ok(mentorship_repo.set_status(session, status, None).await?),
        None => Ok(session),
    }
}

async fn apply_event(
    db: &DatabaseConnection,
    actor: &Actor,
    session_id: Uuid,
    event: SessionEvent,
    notes: Option<String>,
) -> AppResult<mentorship_session::Model> {
    let action = match event {
        SessionEvent::Start | SessionEvent::Complete => Action::ProgressSession,
        SessionEvent::Cancel => Action::CancelSession,
    };
    let session = load_for_action(db, actor, session_id, action).await?;
    let status = transition(session.status, event)?;

    let session = MentorshipRepository::new(db)
        .set_status(session, status, notes)
        .await?;
    tracing::info!(session_id = %session_id, status = status.as_str(), "mentorship session {event}");
    Ok(session)
}

pub async fn start_session(
    db: &DatabaseConnection,
    actor: &Actor,
    session_id: Uuid,
) -> AppResult<mentorship_session::Model> {
    apply_event(db, actor, session_id, SessionEvent::Start, None).await
}

pub async fn complete_session(
    db: &DatabaseConnection,
    actor: &Actor,
    session_id: Uuid,
    notes: Option<String>,
) -> AppResult<mentorship_session::Model> {
    apply_event(db, actor, session_id, SessionEvent::Complete, notes).await
}

pub async fn cancel_session(
    db: &DatabaseConnection,
    actor: &Actor,
    session_id: Uuid,
    reason: Option<String>,
) -> AppResult<mentorship_session::Model> {
    apply_event(db, actor, session_id, SessionEvent::Cancel, reason).await
}

pub async fn rate_session(
    db: &DatabaseConnection,
    actor: &Actor,
    session_id: Uuid,
    rating: i16,
    feedback: Option<String>,
) -> AppResult<mentorship_session::Model> {
    let session = load_for_action(db, actor, session_id, Action::RateSession).await?;
    check_rating(session.status, rating)?;

    Ok(MentorshipRepository::new(db)
        .rate(session, rating, feedback, actor.user_id)
        .await?)
}

/// Sessions booked for the TA on `date` and the free hour slots left.
pub async fn availability(
    db: &DatabaseConnection,
    ta_id: Uuid,
    date: NaiveDate,
) -> AppResult<Availability> {
    let ta = UserRepository::new(db)
        .find_by_id(ta_id)
        .await?
        .filter(|u| u.role == RoleEnum::Ta)
        .ok_or_else(|| AppError::not_found("TA"))?;

    let day_start = date.and_time(chrono::NaiveTime::MIN);
    let booked = MentorshipRepository::new(db)
        .find_booked_between(ta.user_id, day_start, day_start + Duration::days(1))
        .await?;
    let slots: Vec<Slot> = booked
        .iter()
        .map(|s| Slot::new(s.scheduled_at, s.duration_minutes as i64))
        .collect();

    Ok(Availability {
        date,
        free_slots: free_slots(date, &slots),
        booked,
    })
}
