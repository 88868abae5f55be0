//! Role and relationship checks gating every mutation.
//!
//! A request is allowed when the caller's role is granted the action in
//! [`PERMISSIONS`] and at least one of the relationships listed for that
//! (role, action) pair holds.

use std::fmt;

use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{course, course_enrollment, course_ta, mentorship_session};
use crate::error::{AppError, AppResult};

/// The authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: RoleEnum,
}

impl Actor {
    pub fn new(user_id: Uuid, role: RoleEnum) -> Self {
        Self { user_id, role }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateCourse,
    EditCourse,
    ManageContent,
    ViewDraftContent,
    Enroll,
    ManageTas,
    GradeSubmission,
    ViewSubmissions,
    SubmitAssignment,
    TrackProgress,
    ViewCourseAnalytics,
    ViewCourseSessions,
    ScheduleSession,
    ProgressSession,
    EditSession,
    CancelSession,
    RateSession,
    RateCourse,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CreateCourse => "create courses",
            Self::EditCourse => "modify this course",
            Self::ManageContent => "manage content of this course",
            Self::ViewDraftContent => "view unpublished content of this course",
            Self::Enroll => "enroll in courses",
            Self::ManageTas => "manage teaching assistants of this course",
            Self::GradeSubmission => "grade submissions of this course",
            Self::ViewSubmissions => "view submissions of this course",
            Self::SubmitAssignment => "submit assignments of this course",
            Self::TrackProgress => "track progress in this course",
            Self::ViewCourseAnalytics => "view analytics of this course",
            Self::ViewCourseSessions => "view mentorship sessions of this course",
            Self::ScheduleSession => "schedule mentorship sessions in this course",
            Self::ProgressSession => "start or complete this session",
            Self::EditSession => "edit this session",
            Self::CancelSession => "cancel this session",
            Self::RateSession => "rate this session",
            Self::RateCourse => "rate courses",
        };
        f.write_str(text)
    }
}

/// Relationship the caller must have with the target for a grant to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Anyone,
    Owner,
    AssignedTa,
    Enrolled,
    NotEnrolled,
    SessionTa,
    SessionParticipant,
}

use Action::*;
use Requirement::*;
use RoleEnum::{Educator, IndustryExpert, Student, Ta};

pub const PERMISSIONS: &[(RoleEnum, Action, Requirement)] = &[
    (Educator, CreateCourse, Anyone),
    (Educator, EditCourse, Owner),
    (Educator, ManageContent, Owner),
    (Educator, ViewDraftContent, Owner),
    (Ta, ViewDraftContent, AssignedTa),
    (Student, Enroll, NotEnrolled),
    (Educator, ManageTas, Owner),
    (Educator, GradeSubmission, Owner),
    (Educator, ViewSubmissions, Owner),
    (Ta, ViewSubmissions, AssignedTa),
    (Student, SubmitAssignment, Enrolled),
    (Student, TrackProgress, Enrolled),
    (Educator, ViewCourseAnalytics, Owner),
    (Educator, ViewCourseSessions, Owner),
    (Ta, ViewCourseSessions, AssignedTa),
    (Ta, ScheduleSession, AssignedTa),
    (Student, ScheduleSession, Enrolled),
    (Ta, ProgressSession, SessionTa),
    (Ta, EditSession, SessionParticipant),
    (Student, EditSession, SessionParticipant),
    (Ta, CancelSession, SessionParticipant),
    (Student, CancelSession, SessionParticipant),
    (Ta, RateSession, SessionParticipant),
    (Student, RateSession, SessionParticipant),
    (IndustryExpert, RateCourse, Anyone),
];

/// What the caller is to the course (and session) being acted on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relationship {
    pub owner: bool,
    pub enrolled: bool,
    pub assigned_ta: bool,
    pub session_ta: bool,
    pub session_student: bool,
}

impl Relationship {
    pub fn for_course(
        course: &course::Model,
        user_id: Uuid,
        enrollment: Option<&course_enrollment::Model>,
        ta: Option<&course_ta::Model>,
    ) -> Self {
        Self {
            owner: is_owner(course, user_id),
            enrolled: is_enrolled(enrollment, user_id),
            assigned_ta: is_assigned_ta(ta, user_id),
            ..Self::default()
        }
    }

    pub fn with_session(mut self, session: &mentorship_session::Model, user_id: Uuid) -> Self {
        self.session_ta = session.ta_id == user_id;
        self.session_student = session.student_id == user_id;
        self
    }

    fn satisfies(&self, requirement: Requirement) -> bool {
        match requirement {
            Anyone => true,
            Owner => self.owner,
            AssignedTa => self.assigned_ta,
            Enrolled => self.enrolled,
            NotEnrolled => !self.enrolled,
            SessionTa => self.session_ta,
            SessionParticipant => self.session_ta || self.session_student,
        }
    }
}

pub fn is_owner(course: &course::Model, user_id: Uuid) -> bool {
    course.educator_id == user_id
}

pub fn is_enrolled(enrollment: Option<&course_enrollment::Model>, user_id: Uuid) -> bool {
    enrollment.is_some_and(|e| e.student_id == user_id)
}

pub fn is_assigned_ta(assignment: Option<&course_ta::Model>, user_id: Uuid) -> bool {
    assignment.is_some_and(|a| a.ta_id == user_id)
}

pub fn role_allows(role: RoleEnum, action: Action) -> bool {
    PERMISSIONS.iter().any(|(r, a, _)| *r == role && *a == action)
}

pub fn authorize(actor: &Actor, action: Action, relationship: &Relationship) -> AppResult<()> {
    let requirements: Vec<Requirement> = PERMISSIONS
        .iter()
        .filter(|(role, granted, _)| *role == actor.role && *granted == action)
        .map(|(_, _, requirement)| *requirement)
        .collect();

    if requirements.is_empty() {
        return Err(AppError::Forbidden(format!(
            "Role {} is not allowed to {}",
            actor.role.as_str(),
            action
        )));
    }

    if requirements.iter().any(|r| relationship.satisfies(*r)) {
        return Ok(());
    }

    if requirements.contains(&NotEnrolled) {
        return Err(AppError::Conflict(
            "Already enrolled in this course".to_string(),
        ));
    }

    Err(AppError::Forbidden(format!("You are not allowed to {action}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::DifficultyEnum;
    use chrono::Utc;

    fn course_owned_by(educator_id: Uuid) -> course::Model {
        let now = Utc::now().naive_utc();
        course::Model {
            course_id: Uuid::new_v4(),
            title: "Rust".to_string(),
            description: "Systems".to_string(),
            category: "programming".to_string(),
            difficulty: DifficultyEnum::Beginner,
            thumbnail: None,
            educator_id,
            is_published: true,
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_owner_predicate() {
        let educator = Uuid::new_v4();
        let course = course_owned_by(educator);
        assert!(is_owner(&course, educator));
        assert!(!is_owner(&course, Uuid::new_v4()));
    }

    #[test]
    fn test_enrolled_and_ta_predicates() {
        let course_id = Uuid::new_v4();
        let student = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        let enrollment = course_enrollment::Model {
            course_id,
            student_id: student,
            progress: 0,
            enrolled_at: now,
        };
        assert!(is_enrolled(Some(&enrollment), student));
        assert!(!is_enrolled(Some(&enrollment), Uuid::new_v4()));
        assert!(!is_enrolled(None, student));

        let ta = Uuid::new_v4();
        let row = course_ta::Model {
            course_id,
            ta_id: ta,
            assigned_at: now,
        };
        assert!(is_assigned_ta(Some(&row), ta));
        assert!(!is_assigned_ta(None, ta));
    }

    #[test]
    fn test_content_management_requires_owner() {
        let educator = Actor::new(Uuid::new_v4(), Educator);
        let owner = Relationship {
            owner: true,
            ..Relationship::default()
        };
        assert!(authorize(&educator, ManageContent, &owner).is_ok());

        let stranger = Relationship::default();
        let err = authorize(&educator, ManageContent, &stranger).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_role_without_grant_is_forbidden() {
        let student = Actor::new(Uuid::new_v4(), Student);
        let everything = Relationship {
            owner: true,
            enrolled: true,
            assigned_ta: true,
            session_ta: true,
            session_student: true,
        };
        assert!(matches!(
            authorize(&student, ManageContent, &everything),
            Err(AppError::Forbidden(_))
        ));
        assert!(!role_allows(Educator, Enroll));
        assert!(!role_allows(IndustryExpert, ManageTas));
    }

    #[test]
    fn test_double_enrollment_is_conflict() {
        let student = Actor::new(Uuid::new_v4(), Student);
        assert!(authorize(&student, Enroll, &Relationship::default()).is_ok());

        let enrolled = Relationship {
            enrolled: true,
            ..Relationship::default()
        };
        assert!(matches!(
            authorize(&student, Enroll, &enrolled),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_session_actions_follow_participation() {
        let ta_id = Uuid::new_v4();
        let student_id = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        let session = mentorship_session::Model {
            session_id: Uuid::new_v4(),
            ta_id,
            student_id,
            course_id: Uuid::new_v4(),
            title: "Office hours".to_string(),
            description: None,
            scheduled_at: now,
            duration_minutes: 30,
            meeting_link: None,
            status: crate::entities::sea_orm_active_enums::SessionStatusEnum::Scheduled,
            notes: None,
            rating: None,
            rating_feedback: None,
            rated_by: None,
            created_at: now,
            updated_at: now,
        };

        let ta = Actor::new(ta_id, Ta);
        let student = Actor::new(student_id, Student);
        let ta_rel = Relationship::default().with_session(&session, ta_id);
        let student_rel = Relationship::default().with_session(&session, student_id);

        assert!(authorize(&ta, ProgressSession, &ta_rel).is_ok());
        assert!(authorize(&student, ProgressSession, &student_rel).is_err());
        assert!(authorize(&student, CancelSession, &student_rel).is_ok());
        assert!(authorize(&student, RateSession, &student_rel).is_ok());

        let outsider = Actor::new(Uuid::new_v4(), Student);
        let outsider_rel = Relationship::default().with_session(&session, outsider.user_id);
        assert!(authorize(&outsider, CancelSession, &outsider_rel).is_err());
    }

    #[test]
    fn test_ta_management_is_educator_only() {
        let owner = Relationship {
            owner: true,
            ..Relationship::default()
        };
        assert!(authorize(&Actor::new(Uuid::new_v4(), Educator), ManageTas, &owner).is_ok());
        assert!(
            authorize(&Actor::new(Uuid::new_v4(), IndustryExpert), ManageTas, &owner).is_err()
        );
    }
}
