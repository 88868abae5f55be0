use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, patch, post},
};
use uuid::Uuid;

use super::dto::{
    AvailabilityQuery, AvailabilityResponse, CreateSessionRequest, RateSessionRequest,
    SessionNotesRequest, SessionQuery, SessionResponse, UpdateSessionRequest,
};
use crate::error::AppError;
use crate::extractor::AuthClaims;
use crate::services::mentorship_service;
use crate::static_service::connection;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/mentorship", post(create_session))
        .route("/api/v1/mentorship/mine", get(my_sessions))
        .route("/api/v1/mentorship/course/{course_id}", get(course_sessions))
        .route(
            "/api/v1/mentorship/availability/{ta_id}",
            get(availability),
        )
        .route(
            "/api/v1/mentorship/{session_id}",
            get(get_session).put(update_session),
        )
        .route("/api/v1/mentorship/{session_id}/start", patch(start_session))
        .route("/api/v1/mentorship/{session_id}/complete", patch(complete_session))
        .route("/api/v1/mentorship/{session_id}/cancel", patch(cancel_session))
        .route("/api/v1/mentorship/{session_id}/rate", post(rate_session))
}

fn sessions_response(
    sessions: Vec<crate::entities::mentorship_session::Model>,
) -> Json<Vec<SessionResponse>> {
    Json(sessions.into_iter().map(Into::into).collect())
}

/// Book a mentorship session between a TA and a student of the course
#[utoipa::path(
    post,
    path = "/api/v1/mentorship",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session scheduled", body = SessionResponse),
        (status = 400, description = "Invalid schedule or participants"),
        (status = 403, description = "Not allowed to schedule in this course"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Mentorship"
)]
pub async fn create_session(
    auth: AuthClaims,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let db = connection()?;
    let session = mentorship_service::create_session(db, &auth.actor(), payload.into()).await?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/mentorship/mine",
    params(SessionQuery),
    responses(
        (status = 200, description = "Sessions of the caller", body = Vec<SessionResponse>)
    ),
    security(("bearer_auth" = [])),
    tag = "Mentorship"
)]
pub async fn my_sessions(
    auth: AuthClaims,
    Query(query): Query<SessionQuery>,
) -> Result<(StatusCode, Json<Vec<SessionResponse>>), AppError> {
    let db = connection()?;
    let sessions = mentorship_service::my_sessions(db, &auth.actor(), query.status).await?;

    Ok((StatusCode::OK, sessions_response(sessions)))
}

#[utoipa::path(
    get,
    path = "/api/v1/mentorship/course/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Sessions of the course", body = Vec<SessionResponse>),
        (status = 403, description = "Not the course owner or an assigned TA"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Mentorship"
)]
pub async fn course_sessions(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Vec<SessionResponse>>), AppError> {
    let db = connection()?;
    let sessions = mentorship_service::course_sessions(db, &auth.actor(), course_id).await?;

    Ok((StatusCode::OK, sessions_response(sessions)))
}

#[utoipa::path(
    get,
    path = "/api/v1/mentorship/{session_id}",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session", body = SessionResponse),
        (status = 403, description = "Not a participant"),
        (status = 404, description = "Session not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Mentorship"
)]
pub async fn get_session(
    auth: AuthClaims,
    Path(session_id): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let db = connection()?;
    let session = mentorship_service::get_session(db, &auth.actor(), session_id).await?;

    Ok((StatusCode::OK, Json(session.into())))
}

/// Reschedule or edit a session that is not finished yet
#[utoipa::path(
    put,
    path = "/api/v1/mentorship/{session_id}",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    request_body = UpdateSessionRequest,
    responses(
        (status = 200, description = "Session updated", body = SessionResponse),
        (status = 400, description = "Invalid change or status transition"),
        (status = 403, description = "Not a participant"),
        (status = 404, description = "Session not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Mentorship"
)]
pub async fn update_session(
    auth: AuthClaims,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<UpdateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let db = connection()?;
    let session =
        mentorship_service::update_session(db, &auth.actor(), session_id, payload.into()).await?;

    Ok((StatusCode::OK, Json(session.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/mentorship/{session_id}/start",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session ongoing", body = SessionResponse),
        (status = 400, description = "Session is not scheduled"),
        (status = 403, description = "Only the session TA can start it")
    ),
    security(("bearer_auth" = [])),
    tag = "Mentorship"
)]
pub async fn start_session(
    auth: AuthClaims,
    Path(session_id): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let db = connection()?;
    let session = mentorship_service::start_session(db, &auth.actor(), session_id).await?;

    Ok((StatusCode::OK, Json(session.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/mentorship/{session_id}/complete",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    request_body = SessionNotesRequest,
    responses(
        (status = 200, description = "Session completed", body = SessionResponse),
        (status = 400, description = "Session already finished"),
        (status = 403, description = "Only the session TA can complete it")
    ),
    security(("bearer_auth" = [])),
    tag = "Mentorship"
)]
pub async fn complete_session(
    auth: AuthClaims,
    Path(session_id): Path<Uuid>,
    payload: Option<Json<SessionNotesRequest>>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let db = connection()?;
    let notes = payload.and_then(|Json(body)| body.notes);
    let session =
        mentorship_service::complete_session(db, &auth.actor(), session_id, notes).await?;

    Ok((StatusCode::OK, Json(session.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/mentorship/{session_id}/cancel",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    request_body = SessionNotesRequest,
    responses(
        (status = 200, description = "Session cancelled", body = SessionResponse),
        (status = 400, description = "Session already finished"),
        (status = 403, description = "Not a participant")
    ),
    security(("bearer_auth" = [])),
    tag = "Mentorship"
)]
pub async fn cancel_session(
    auth: AuthClaims,
    Path(session_id): Path<Uuid>,
    payload: Option<Json<SessionNotesRequest>>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let db = connection()?;
    let reason = payload.and_then(|Json(body)| body.notes);
    let session =
        mentorship_service::cancel_session(db, &auth.actor(), session_id, reason).await?;

    Ok((StatusCode::OK, Json(session.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/mentorship/{session_id}/rate",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    request_body = RateSessionRequest,
    responses(
        (status = 200, description = "Session rated", body = SessionResponse),
        (status = 400, description = "Session not completed or rating out of range"),
        (status = 403, description = "Not a participant")
    ),
    security(("bearer_auth" = [])),
    tag = "Mentorship"
)]
pub async fn rate_session(
    auth: AuthClaims,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<RateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let db = connection()?;
    let session = mentorship_service::rate_session(
        db,
        &auth.actor(),
        session_id,
        payload.rating,
        payload.feedback,
    )
    .await?;

    Ok((StatusCode::OK, Json(session.into())))
}

/// Booked sessions and free one-hour slots of a TA on a given day
#[utoipa::path(
    get,
    path = "/api/v1/mentorship/availability/{ta_id}",
    params(
        ("ta_id" = Uuid, Path, description = "TA user ID"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Availability", body = AvailabilityResponse),
        (status = 404, description = "TA not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Mentorship"
)]
pub async fn availability(
    _auth: AuthClaims,
    Path(ta_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<(StatusCode, Json<AvailabilityResponse>), AppError> {
    let db = connection()?;
    let availability = mentorship_service::availability(db, ta_id, query.date).await?;

    Ok((StatusCode::OK, Json(availability.into())))
}
