use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::routes::auth::dto::UserResponse;
use crate::routes::mentorship::dto::SessionResponse;
use crate::services::ta_service::{SessionStats, TaAssignment, TaCourse, TaDetail, TaOverview};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignTaRequest {
    pub course_id: Uuid,
    #[schema(example = "ta@example.com")]
    pub email: String,
    /// Display name used when a new account has to be created.
    pub name: Option<String>,
    #[serde(default)]
    pub student_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseAssignTaRequest {
    #[schema(example = "ta@example.com")]
    pub email: String,
    pub name: Option<String>,
    #[serde(default)]
    pub student_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaStudentsRequest {
    pub student_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaAssignmentResponse {
    pub ta: UserResponse,
    pub course_id: Uuid,
    pub assigned_at: NaiveDateTime,
    pub assigned_students: Vec<Uuid>,
    pub account_created: bool,
}

impl From<TaAssignment> for TaAssignmentResponse {
    fn from(assignment: TaAssignment) -> Self {
        Self {
            ta: assignment.ta.into(),
            course_id: assignment.course_ta.course_id,
            assigned_at: assignment.course_ta.assigned_at,
            assigned_students: assignment.assigned_students,
            account_created: assignment.account_created,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaStudentsResponse {
    pub course_id: Uuid,
    pub ta_id: Uuid,
    pub assigned_students: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaCourseResponse {
    pub course_id: Uuid,
    pub title: String,
    pub assigned_at: NaiveDateTime,
    pub assigned_students: Vec<Uuid>,
}

impl From<TaCourse> for TaCourseResponse {
    fn from(ta_course: TaCourse) -> Self {
        Self {
            course_id: ta_course.course.course_id,
            title: ta_course.course.title,
            assigned_at: ta_course.assigned_at,
            assigned_students: ta_course.assigned_students,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaOverviewResponse {
    pub ta: UserResponse,
    pub courses: Vec<TaCourseResponse>,
}

impl From<TaOverview> for TaOverviewResponse {
    fn from(overview: TaOverview) -> Self {
        Self {
            ta: overview.ta.into(),
            courses: overview.courses.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionStatsResponse {
    pub total: usize,
    pub scheduled: usize,
    pub ongoing: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub average_rating: Option<f64>,
}

impl From<SessionStats> for SessionStatsResponse {
    fn from(stats: SessionStats) -> Self {
        Self {
            total: stats.total,
            scheduled: stats.scheduled,
            ongoing: stats.ongoing,
            completed: stats.completed,
            cancelled: stats.cancelled,
            average_rating: stats.average_rating,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaDetailResponse {
    pub ta: UserResponse,
    pub courses: Vec<TaCourseResponse>,
    pub sessions: Vec<SessionResponse>,
    pub stats: SessionStatsResponse,
}

impl From<TaDetail> for TaDetailResponse {
    fn from(detail: TaDetail) -> Self {
        Self {
            ta: detail.overview.ta.into(),
            courses: detail.overview.courses.into_iter().map(Into::into).collect(),
            sessions: detail.sessions.into_iter().map(Into::into).collect(),
            stats: detail.stats.into(),
        }
    }
}
