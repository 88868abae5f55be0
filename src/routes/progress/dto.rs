use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::progress::WatchState;
use crate::entities::{document_view, lecture_watch, student_progress};
use crate::routes::auth::dto::UserResponse;
use crate::routes::courses::dto::CourseResponse;
use crate::services::progress_service::{
    CourseAnalytics, CourseProgress, StudentAnalytics, StudentCourseProgress,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LectureWatchRequest {
    /// Seconds watched so far.
    #[serde(default)]
    pub watch_time: i32,
    #[serde(default)]
    pub completed: bool,
}

impl From<LectureWatchRequest> for WatchState {
    fn from(request: LectureWatchRequest) -> Self {
        Self {
            watch_time: request.watch_time,
            completed: request.completed,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgressResponse {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub overall_progress: i32,
    pub last_accessed_at: NaiveDateTime,
}

impl From<student_progress::Model> for ProgressResponse {
    fn from(progress: student_progress::Model) -> Self {
        Self {
            student_id: progress.student_id,
            course_id: progress.course_id,
            overall_progress: progress.overall_progress,
            last_accessed_at: progress.last_accessed_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LectureWatchResponse {
    pub lecture_id: Uuid,
    pub watch_time: i32,
    pub completed: bool,
    pub last_watched_at: NaiveDateTime,
}

impl From<lecture_watch::Model> for LectureWatchResponse {
    fn from(watch: lecture_watch::Model) -> Self {
        Self {
            lecture_id: watch.lecture_id,
            watch_time: watch.watch_time,
            completed: watch.completed,
            last_watched_at: watch.last_watched_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentViewResponse {
    pub document_id: Uuid,
    pub viewed_at: NaiveDateTime,
}

impl From<document_view::Model> for DocumentViewResponse {
    fn from(view: document_view::Model) -> Self {
        Self {
            document_id: view.document_id,
            viewed_at: view.viewed_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseProgressResponse {
    pub progress: ProgressResponse,
    pub published_lectures: u64,
    pub published_documents: u64,
    pub lectures: Vec<LectureWatchResponse>,
    pub documents: Vec<DocumentViewResponse>,
}

impl From<CourseProgress> for CourseProgressResponse {
    fn from(value: CourseProgress) -> Self {
        Self {
            progress: value.progress.into(),
            published_lectures: value.published_lectures,
            published_documents: value.published_documents,
            lectures: value.watches.into_iter().map(Into::into).collect(),
            documents: value.views.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WatchRecordedResponse {
    pub watch: LectureWatchResponse,
    pub progress: ProgressResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ViewRecordedResponse {
    pub view: DocumentViewResponse,
    pub progress: ProgressResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyCourseProgressResponse {
    pub course: CourseResponse,
    pub progress: ProgressResponse,
}

impl From<StudentCourseProgress> for MyCourseProgressResponse {
    fn from(value: StudentCourseProgress) -> Self {
        Self {
            course: value.course.into(),
            progress: value.progress.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentAnalyticsResponse {
    pub student: UserResponse,
    pub progress: i32,
    pub enrolled_at: NaiveDateTime,
}

impl From<StudentAnalytics> for StudentAnalyticsResponse {
    fn from(value: StudentAnalytics) -> Self {
        Self {
            student: value.student.into(),
            progress: value.progress,
            enrolled_at: value.enrolled_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseAnalyticsResponse {
    pub course: CourseResponse,
    pub enrolled_students: usize,
    pub average_progress: f64,
    pub completed_students: usize,
    pub sessions_total: usize,
    pub sessions_completed: usize,
    pub students: Vec<StudentAnalyticsResponse>,
}

impl From<CourseAnalytics> for CourseAnalyticsResponse {
    fn from(value: CourseAnalytics) -> Self {
        Self {
            course: value.course.into(),
            enrolled_students: value.enrolled_students,
            average_progress: value.average_progress,
            completed_students: value.completed_students,
            sessions_total: value.sessions_total,
            sessions_completed: value.sessions_completed,
            students: value.students.into_iter().map(Into::into).collect(),
        }
    }
}
