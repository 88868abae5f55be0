use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::lecture;
use crate::repositories::LectureUpdate;
use crate::services::lecture_service::NewLecture;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLectureRequest {
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    /// Length in seconds.
    #[serde(default)]
    pub duration: i32,
}

impl From<CreateLectureRequest> for NewLecture {
    fn from(request: CreateLectureRequest) -> Self {
        Self {
            course_id: request.course_id,
            title: request.title,
            description: request.description,
            video_url: request.video_url,
            duration: request.duration,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLectureRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<i32>,
}

impl From<UpdateLectureRequest> for LectureUpdate {
    fn from(request: UpdateLectureRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            video_url: request.video_url,
            duration: request.duration,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    /// IDs in their new order; the first gets position 1.
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LectureResponse {
    pub lecture_id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub duration: i32,
    pub sort_order: i32,
    pub is_published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<lecture::Model> for LectureResponse {
    fn from(lecture: lecture::Model) -> Self {
        Self {
            lecture_id: lecture.lecture_id,
            course_id: lecture.course_id,
            title: lecture.title,
            description: lecture.description,
            video_url: lecture.video_url,
            duration: lecture.duration,
            sort_order: lecture.sort_order,
            is_published: lecture.is_published,
            created_at: lecture.created_at,
            updated_at: lecture.updated_at,
        }
    }
}
