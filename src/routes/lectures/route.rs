use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, patch, post, put},
};
use uuid::Uuid;

use super::dto::{CreateLectureRequest, LectureResponse, ReorderRequest, UpdateLectureRequest};
use crate::entities::lecture;
use crate::error::AppError;
use crate::extractor::AuthClaims;
use crate::routes::MessageResponse;
use crate::services::lecture_service;
use crate::static_service::connection;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/lectures", post(create_lecture))
        .route("/api/v1/lectures/course/{course_id}", get(list_lectures))
        .route(
            "/api/v1/lectures/course/{course_id}/reorder",
            put(reorder_lectures),
        )
        .route(
            "/api/v1/lectures/{lecture_id}",
            get(get_lecture).put(update_lecture).delete(delete_lecture),
        )
        .route("/api/v1/lectures/{lecture_id}/publish", patch(toggle_publish))
}

fn list_response(lectures: Vec<lecture::Model>) -> Json<Vec<LectureResponse>> {
    Json(lectures.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    post,
    path = "/api/v1/lectures",
    request_body = CreateLectureRequest,
    responses(
        (status = 201, description = "Lecture created", body = LectureResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Lectures"
)]
pub async fn create_lecture(
    auth: AuthClaims,
    Json(payload): Json<CreateLectureRequest>,
) -> Result<(StatusCode, Json<LectureResponse>), AppError> {
    let db = connection()?;
    let lecture = lecture_service::create_lecture(db, &auth.actor(), payload.into()).await?;

    Ok((StatusCode::CREATED, Json(lecture.into())))
}

/// Lectures of a course; drafts only for the owner and assigned TAs
#[utoipa::path(
    get,
    path = "/api/v1/lectures/course/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Lectures in order", body = Vec<LectureResponse>),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Lectures"
)]
pub async fn list_lectures(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Vec<LectureResponse>>), AppError> {
    let db = connection()?;
    let lectures = lecture_service::list_lectures(db, &auth.actor(), course_id).await?;

    Ok((StatusCode::OK, list_response(lectures)))
}

#[utoipa::path(
    get,
    path = "/api/v1/lectures/{lecture_id}",
    params(("lecture_id" = Uuid, Path, description = "Lecture ID")),
    responses(
        (status = 200, description = "Lecture", body = LectureResponse),
        (status = 404, description = "Lecture not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Lectures"
)]
pub async fn get_lecture(
    auth: AuthClaims,
    Path(lecture_id): Path<Uuid>,
) -> Result<(StatusCode, Json<LectureResponse>), AppError> {
    let db = connection()?;
    let lecture = lecture_service::get_lecture(db, &auth.actor(), lecture_id).await?;

    Ok((StatusCode::OK, Json(lecture.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/lectures/{lecture_id}",
    params(("lecture_id" = Uuid, Path, description = "Lecture ID")),
    request_body = UpdateLectureRequest,
    responses(
        (status = 200, description = "Lecture updated", body = LectureResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Lecture not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Lectures"
)]
pub async fn update_lecture(
    auth: AuthClaims,
    Path(lecture_id): Path<Uuid>,
    Json(payload): Json<UpdateLectureRequest>,
) -> Result<(StatusCode, Json<LectureResponse>), AppError> {
    let db = connection()?;
    let lecture =
        lecture_service::update_lecture(db, &auth.actor(), lecture_id, payload.into()).await?;

    Ok((StatusCode::OK, Json(lecture.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/lectures/{lecture_id}",
    params(("lecture_id" = Uuid, Path, description = "Lecture ID")),
    responses(
        (status = 200, description = "Lecture deleted", body = MessageResponse),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Lecture not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Lectures"
)]
pub async fn delete_lecture(
    auth: AuthClaims,
    Path(lecture_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let db = connection()?;
    lecture_service::delete_lecture(db, &auth.actor(), lecture_id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::ok("Lecture deleted successfully")),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/v1/lectures/{lecture_id}/publish",
    operation_id = "toggle_lecture_publish",
    params(("lecture_id" = Uuid, Path, description = "Lecture ID")),
    responses(
        (status = 200, description = "Publish state toggled", body = LectureResponse),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Lecture not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Lectures"
)]
pub async fn toggle_publish(
    auth: AuthClaims,
    Path(lecture_id): Path<Uuid>,
) -> Result<(StatusCode, Json<LectureResponse>), AppError> {
    let db = connection()?;
    let lecture = lecture_service::toggle_publish(db, &auth.actor(), lecture_id).await?;

    Ok((StatusCode::OK, Json(lecture.into())))
}

/// Reorder lectures; omitted lectures keep their position
#[utoipa::path(
    put,
    path = "/api/v1/lectures/course/{course_id}/reorder",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Lectures in their new order", body = Vec<LectureResponse>),
        (status = 400, description = "Unknown or repeated lecture ID"),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Lectures"
)]
pub async fn reorder_lectures(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<ReorderRequest>,
) -> Result<(StatusCode, Json<Vec<LectureResponse>>), AppError> {
    let db = connection()?;
    let lectures =
        lecture_service::reorder_lectures(db, &auth.actor(), course_id, payload.ids).await?;

    Ok((StatusCode::OK, list_response(lectures)))
}
