use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, patch, post, put},
};
use uuid::Uuid;

use super::dto::{
    AssignmentDetailResponse, AssignmentResponse, CreateAssignmentRequest,
    GradeSubmissionRequest, StudentSubmissionResponse, SubmissionResponse,
    SubmitAssignmentRequest, UpdateAssignmentRequest,
};
use crate::error::AppError;
use crate::extractor::AuthClaims;
use crate::routes::MessageResponse;
use crate::services::assignment_service;
use crate::static_service::connection;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/assignments", post(create_assignment))
        .route(
            "/api/v1/assignments/course/{course_id}",
            get(list_assignments),
        )
        .route(
            "/api/v1/assignments/{assignment_id}",
            get(get_assignment)
                .put(update_assignment)
                .delete(delete_assignment),
        )
        .route("/api/v1/assignments/{assignment_id}/submit", post(submit))
        .route(
            "/api/v1/assignments/{assignment_id}/grade/{student_id}",
            put(grade),
        )
        .route(
            "/api/v1/assignments/{assignment_id}/publish",
            patch(toggle_publish),
        )
        .route(
            "/api/v1/assignments/{assignment_id}/submissions",
            get(list_submissions),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/assignments",
    request_body = CreateAssignmentRequest,
    responses(
        (status = 201, description = "Assignment created", body = AssignmentResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
pub async fn create_assignment(
    auth: AuthClaims,
    Json(payload): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), AppError> {
    let db = connection()?;
    let assignment =
        assignment_service::create_assignment(db, &auth.actor(), payload.into()).await?;

    Ok((StatusCode::CREATED, Json(assignment.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/assignments/course/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Assignments by due date", body = Vec<AssignmentResponse>),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
pub async fn list_assignments(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Vec<AssignmentResponse>>), AppError> {
    let db = connection()?;
    let assignments = assignment_service::list_assignments(db, &auth.actor(), course_id).await?;

    Ok((
        StatusCode::OK,
        Json(assignments.into_iter().map(Into::into).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/assignments/{assignment_id}",
    params(("assignment_id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment with the caller's submission", body = AssignmentDetailResponse),
        (status = 404, description = "Assignment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
pub async fn get_assignment(
    auth: AuthClaims,
    Path(assignment_id): Path<Uuid>,
) -> Result<(StatusCode, Json<AssignmentDetailResponse>), AppError> {
    let db = connection()?;
    let (assignment, submission) =
        assignment_service::get_assignment(db, &auth.actor(), assignment_id).await?;

    Ok((
        StatusCode::OK,
        Json(AssignmentDetailResponse {
            assignment: assignment.into(),
            submission: submission.map(Into::into),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/assignments/{assignment_id}",
    params(("assignment_id" = Uuid, Path, description = "Assignment ID")),
    request_body = UpdateAssignmentRequest,
    responses(
        (status = 200, description = "Assignment updated", body = AssignmentResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Assignment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
pub async fn update_assignment(
    auth: AuthClaims,
    Path(assignment_id): Path<Uuid>,
    Json(payload): Json<UpdateAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), AppError> {
    let db = connection()?;
    let assignment =
        assignment_service::update_assignment(db, &auth.actor(), assignment_id, payload.into())
            .await?;

    Ok((StatusCode::OK, Json(assignment.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/assignments/{assignment_id}",
    params(("assignment_id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment deleted", body = MessageResponse),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Assignment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
pub async fn delete_assignment(
    auth: AuthClaims,
    Path(assignment_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let db = connection()?;
    assignment_service::delete_assignment(db, &auth.actor(), assignment_id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::ok("Assignment deleted successfully")),
    ))
}

/// Submit (or resubmit before grading) the caller's files
#[utoipa::path(
    post,
    path = "/api/v1/assignments/{assignment_id}/submit",
    params(("assignment_id" = Uuid, Path, description = "Assignment ID")),
    request_body = SubmitAssignmentRequest,
    responses(
        (status = 200, description = "Submission stored", body = SubmissionResponse),
        (status = 400, description = "Deadline passed, unpublished, or already graded"),
        (status = 403, description = "Not enrolled"),
        (status = 404, description = "Assignment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
pub async fn submit(
    auth: AuthClaims,
    Path(assignment_id): Path<Uuid>,
    Json(payload): Json<SubmitAssignmentRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), AppError> {
    let db = connection()?;
    let submission =
        assignment_service::submit(db, &auth.actor(), assignment_id, payload.files).await?;

    Ok((StatusCode::OK, Json(submission.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/assignments/{assignment_id}/grade/{student_id}",
    params(
        ("assignment_id" = Uuid, Path, description = "Assignment ID"),
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    request_body = GradeSubmissionRequest,
    responses(
        (status = 200, description = "Submission graded", body = SubmissionResponse),
        (status = 400, description = "Marks out of range"),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Assignment or submission not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
pub async fn grade(
    auth: AuthClaims,
    Path((assignment_id, student_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<GradeSubmissionRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), AppError> {
    let db = connection()?;
    let submission = assignment_service::grade(
        db,
        &auth.actor(),
        assignment_id,
        student_id,
        payload.marks,
        payload.feedback,
    )
    .await?;

    Ok((StatusCode::OK, Json(submission.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/assignments/{assignment_id}/publish",
    operation_id = "toggle_assignment_publish",
    params(("assignment_id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Publish state toggled", body = AssignmentResponse),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Assignment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
pub async fn toggle_publish(
    auth: AuthClaims,
    Path(assignment_id): Path<Uuid>,
) -> Result<(StatusCode, Json<AssignmentResponse>), AppError> {
    let db = connection()?;
    let assignment =
        assignment_service::toggle_publish(db, &auth.actor(), assignment_id).await?;

    Ok((StatusCode::OK, Json(assignment.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/assignments/{assignment_id}/submissions",
    params(("assignment_id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Submissions with their students", body = Vec<StudentSubmissionResponse>),
        (status = 403, description = "Not the course owner or an assigned TA"),
        (status = 404, description = "Assignment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
pub async fn list_submissions(
    auth: AuthClaims,
    Path(assignment_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Vec<StudentSubmissionResponse>>), AppError> {
    let db = connection()?;
    let submissions =
        assignment_service::list_submissions(db, &auth.actor(), assignment_id).await?;

    Ok((
        StatusCode::OK,
        Json(submissions.into_iter().map(Into::into).collect()),
    ))
}
