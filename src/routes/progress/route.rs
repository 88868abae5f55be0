use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{
    CourseAnalyticsResponse, CourseProgressResponse, LectureWatchRequest,
    MyCourseProgressResponse, ViewRecordedResponse, WatchRecordedResponse,
};
use crate::error::AppError;
use crate::extractor::AuthClaims;
use crate::services::progress_service;
use crate::static_service::connection;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/progress/mine", get(my_progress))
        .route(
            "/api/v1/progress/course/{course_id}",
            get(get_course_progress),
        )
        .route(
            "/api/v1/progress/lecture/{lecture_id}",
            post(record_lecture_watch),
        )
        .route(
            "/api/v1/progress/document/{document_id}",
            post(record_document_view),
        )
        .route(
            "/api/v1/progress/analytics/{course_id}",
            get(course_analytics),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/progress/course/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Caller's progress in the course", body = CourseProgressResponse),
        (status = 403, description = "Not enrolled"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Progress"
)]
pub async fn get_course_progress(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<CourseProgressResponse>), AppError> {
    let db = connection()?;
    let progress = progress_service::get_course_progress(db, &auth.actor(), course_id).await?;

    Ok((StatusCode::OK, Json(progress.into())))
}

/// Report watch time for a lecture; completion never reverts
#[utoipa::path(
    post,
    path = "/api/v1/progress/lecture/{lecture_id}",
    params(("lecture_id" = Uuid, Path, description = "Lecture ID")),
    request_body = LectureWatchRequest,
    responses(
        (status = 200, description = "Watch recorded", body = WatchRecordedResponse),
        (status = 400, description = "Invalid watch time"),
        (status = 403, description = "Not enrolled"),
        (status = 404, description = "Lecture not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Progress"
)]
pub async fn record_lecture_watch(
    auth: AuthClaims,
    Path(lecture_id): Path<Uuid>,
    Json(payload): Json<LectureWatchRequest>,
) -> Result<(StatusCode, Json<WatchRecordedResponse>), AppError> {
    let db = connection()?;
    let (watch, progress) =
        progress_service::record_lecture_watch(db, &auth.actor(), lecture_id, payload.into())
            .await?;

    Ok((
        StatusCode::OK,
        Json(WatchRecordedResponse {
            watch: watch.into(),
            progress: progress.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/progress/document/{document_id}",
    params(("document_id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "View recorded", body = ViewRecordedResponse),
        (status = 403, description = "Not enrolled"),
        (status = 404, description = "Document not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Progress"
)]
pub async fn record_document_view(
    auth: AuthClaims,
    Path(document_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ViewRecordedResponse>), AppError> {
    let db = connection()?;
    let (view, progress) =
        progress_service::record_document_view(db, &auth.actor(), document_id).await?;

    Ok((
        StatusCode::OK,
        Json(ViewRecordedResponse {
            view: view.into(),
            progress: progress.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/progress/mine",
    responses(
        (status = 200, description = "Progress across enrolled courses", body = Vec<MyCourseProgressResponse>)
    ),
    security(("bearer_auth" = [])),
    tag = "Progress"
)]
pub async fn my_progress(
    auth: AuthClaims,
) -> Result<(StatusCode, Json<Vec<MyCourseProgressResponse>>), AppError> {
    let db = connection()?;
    let progress = progress_service::my_progress(db, &auth.actor()).await?;

    Ok((
        StatusCode::OK,
        Json(progress.into_iter().map(Into::into).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/progress/analytics/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course analytics", body = CourseAnalyticsResponse),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Progress"
)]
pub async fn course_analytics(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<CourseAnalyticsResponse>), AppError> {
    let db = connection()?;
    let analytics = progress_service::course_analytics(db, &auth.actor(), course_id).await?;

    Ok((StatusCode::OK, Json(analytics.into())))
}
