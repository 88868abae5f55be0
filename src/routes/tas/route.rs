use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post},
};
use uuid::Uuid;

use super::dto::{
    AssignTaRequest, TaAssignmentResponse, TaDetailResponse, TaOverviewResponse,
    TaStudentsResponse, UpdateTaStudentsRequest,
};
use crate::error::AppError;
use crate::extractor::AuthClaims;
use crate::routes::MessageResponse;
use crate::routes::auth::dto::UserResponse;
use crate::services::ta_service::{self, TaAssignmentRequest};
use crate::static_service::connection;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/tas", get(list_tas))
        .route("/api/v1/tas/assign", post(assign_ta))
        .route(
            "/api/v1/tas/available-students/{course_id}",
            get(available_students),
        )
        .route("/api/v1/tas/{ta_id}", get(ta_detail))
        .route(
            "/api/v1/tas/{course_id}/{ta_id}",
            delete(remove_ta).put(update_ta_students),
        )
}

/// TAs working in the caller's courses
#[utoipa::path(
    get,
    path = "/api/v1/tas",
    responses(
        (status = 200, description = "TAs grouped with their courses", body = Vec<TaOverviewResponse>),
        (status = 403, description = "Only educators manage TAs")
    ),
    security(("bearer_auth" = [])),
    tag = "Teaching Assistants"
)]
pub async fn list_tas(
    auth: AuthClaims,
) -> Result<(StatusCode, Json<Vec<TaOverviewResponse>>), AppError> {
    let db = connection()?;
    let overviews = ta_service::list_tas(db, &auth.actor()).await?;

    Ok((
        StatusCode::OK,
        Json(overviews.into_iter().map(Into::into).collect()),
    ))
}

/// Assign a TA by email, creating or promoting the account when needed
#[utoipa::path(
    post,
    path = "/api/v1/tas/assign",
    request_body = AssignTaRequest,
    responses(
        (status = 200, description = "TA assigned", body = TaAssignmentResponse),
        (status = 400, description = "User cannot be a TA or student not enrolled"),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Teaching Assistants"
)]
pub async fn assign_ta(
    auth: AuthClaims,
    Json(payload): Json<AssignTaRequest>,
) -> Result<(StatusCode, Json<TaAssignmentResponse>), AppError> {
    let db = connection()?;
    let assignment = ta_service::assign_ta(
        db,
        &auth.actor(),
        TaAssignmentRequest {
            course_id: payload.course_id,
            email: payload.email,
            name: payload.name,
            student_ids: payload.student_ids,
        },
    )
    .await?;

    Ok((StatusCode::OK, Json(assignment.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tas/{course_id}/{ta_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID"),
        ("ta_id" = Uuid, Path, description = "TA user ID")
    ),
    responses(
        (status = 200, description = "TA removed", body = MessageResponse),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Course or assignment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Teaching Assistants"
)]
pub async fn remove_ta(
    auth: AuthClaims,
    Path((course_id, ta_id)): Path<(Uuid, Uuid)>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let db = connection()?;
    ta_service::remove_ta(db, &auth.actor(), course_id, ta_id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::ok("TA removed from course")),
    ))
}

/// Replace the students a TA is responsible for
#[utoipa::path(
    put,
    path = "/api/v1/tas/{course_id}/{ta_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID"),
        ("ta_id" = Uuid, Path, description = "TA user ID")
    ),
    request_body = UpdateTaStudentsRequest,
    responses(
        (status = 200, description = "Assigned students replaced", body = TaStudentsResponse),
        (status = 400, description = "Student not enrolled"),
        (status = 404, description = "Course or assignment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Teaching Assistants"
)]
pub async fn update_ta_students(
    auth: AuthClaims,
    Path((course_id, ta_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateTaStudentsRequest>,
) -> Result<(StatusCode, Json<TaStudentsResponse>), AppError> {
    let db = connection()?;
    let assigned_students =
        ta_service::update_ta_students(db, &auth.actor(), course_id, ta_id, payload.student_ids)
            .await?;

    Ok((
        StatusCode::OK,
        Json(TaStudentsResponse {
            course_id,
            ta_id,
            assigned_students,
        }),
    ))
}

/// Enrolled students not yet assigned to a TA
#[utoipa::path(
    get,
    path = "/api/v1/tas/available-students/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Unassigned students", body = Vec<UserResponse>),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Teaching Assistants"
)]
pub async fn available_students(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Vec<UserResponse>>), AppError> {
    let db = connection()?;
    let students = ta_service::available_students(db, &auth.actor(), course_id).await?;

    Ok((
        StatusCode::OK,
        Json(students.into_iter().map(Into::into).collect()),
    ))
}

/// TA detail with session analytics
#[utoipa::path(
    get,
    path = "/api/v1/tas/{ta_id}",
    params(("ta_id" = Uuid, Path, description = "TA user ID")),
    responses(
        (status = 200, description = "TA detail", body = TaDetailResponse),
        (status = 403, description = "Only educators manage TAs"),
        (status = 404, description = "TA not found in the caller's courses")
    ),
    security(("bearer_auth" = [])),
    tag = "Teaching Assistants"
)]
pub async fn ta_detail(
    auth: AuthClaims,
    Path(ta_id): Path<Uuid>,
) -> Result<(StatusCode, Json<TaDetailResponse>), AppError> {
    let db = connection()?;
    let detail = ta_service::ta_detail(db, &auth.actor(), ta_id).await?;

    Ok((StatusCode::OK, Json(detail.into())))
}
