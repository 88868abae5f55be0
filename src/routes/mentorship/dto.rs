use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::availability::Slot;
use crate::entities::mentorship_session;
use crate::entities::sea_orm_active_enums::SessionStatusEnum;
use crate::repositories::SessionUpdate;
use crate::services::mentorship_service::{Availability, SessionChanges, SessionRequest};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub course_id: Uuid,
    /// Student ID when a TA books, TA ID when a student books.
    pub participant_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: NaiveDateTime,
    #[schema(example = 60)]
    pub duration_minutes: i32,
    pub meeting_link: Option<String>,
}

impl From<CreateSessionRequest> for SessionRequest {
    fn from(request: CreateSessionRequest) -> Self {
        Self {
            course_id: request.course_id,
            participant_id: request.participant_id,
            title: request.title,
            description: request.description,
            scheduled_at: request.scheduled_at,
            duration_minutes: request.duration_minutes,
            meeting_link: request.meeting_link,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub duration_minutes: Option<i32>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub status: Option<SessionStatusEnum>,
}

impl From<UpdateSessionRequest> for SessionChanges {
    fn from(request: UpdateSessionRequest) -> Self {
        Self {
            update: SessionUpdate {
                title: request.title,
                description: request.description,
                scheduled_at: request.scheduled_at,
                duration_minutes: request.duration_minutes,
                meeting_link: request.meeting_link,
                notes: request.notes,
            },
            status: request.status,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionNotesRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateSessionRequest {
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: i16,
    pub feedback: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SessionQuery {
    pub status: Option<SessionStatusEnum>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Day to check, `YYYY-MM-DD`.
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub ta_id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: NaiveDateTime,
    pub duration_minutes: i32,
    pub meeting_link: Option<String>,
    pub status: SessionStatusEnum,
    pub notes: Option<String>,
    pub rating: Option<i16>,
    pub rating_feedback: Option<String>,
    pub rated_by: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<mentorship_session::Model> for SessionResponse {
    fn from(session: mentorship_session::Model) -> Self {
        Self {
            session_id: session.session_id,
            ta_id: session.ta_id,
            student_id: session.student_id,
            course_id: session.course_id,
            title: session.title,
            description: session.description,
            scheduled_at: session.scheduled_at,
            duration_minutes: session.duration_minutes,
            meeting_link: session.meeting_link,
            status: session.status,
            notes: session.notes,
            rating: session.rating,
            rating_feedback: session.rating_feedback,
            rated_by: session.rated_by,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SlotResponse {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl From<Slot> for SlotResponse {
    fn from(slot: Slot) -> Self {
        Self {
            start: slot.start,
            end: slot.end,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub booked: Vec<SessionResponse>,
    pub free_slots: Vec<SlotResponse>,
}

impl From<Availability> for AvailabilityResponse {
    fn from(availability: Availability) -> Self {
        Self {
            date: availability.date,
            booked: availability.booked.into_iter().map(Into::into).collect(),
            free_slots: availability.free_slots.into_iter().map(Into::into).collect(),
        }
    }
}
