use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, patch, post},
};
use uuid::Uuid;

use super::dto::{
    CourseDetailResponse, CourseListResponse, CourseQuery, CourseResponse, CreateCourseRequest,
    EnrollmentResponse, UpdateCourseRequest,
};
use crate::error::AppError;
use crate::extractor::AuthClaims;
use crate::routes::MessageResponse;
use crate::routes::tas::dto::{CourseAssignTaRequest, TaAssignmentResponse};
use crate::services::course_service;
use crate::services::ta_service::{self, TaAssignmentRequest};
use crate::static_service::connection;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/courses", post(create_course).get(list_courses))
        .route("/api/v1/courses/mine", get(my_courses))
        .route(
            "/api/v1/courses/{course_id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/api/v1/courses/{course_id}/enroll", post(enroll))
        .route("/api/v1/courses/{course_id}/assign-ta", post(assign_ta))
        .route("/api/v1/courses/{course_id}/publish", patch(toggle_publish))
}

#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Only educators can create courses")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    auth: AuthClaims,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    let db = connection()?;
    let course = course_service::create_course(db, &auth.actor(), payload.into()).await?;

    Ok((StatusCode::CREATED, Json(course.into())))
}

/// List published courses; educators also see their own drafts
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    params(CourseQuery),
    responses(
        (status = 200, description = "Courses", body = CourseListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn list_courses(
    auth: AuthClaims,
    Query(query): Query<CourseQuery>,
) -> Result<(StatusCode, Json<CourseListResponse>), AppError> {
    let db = connection()?;
    let courses = course_service::list_courses(db, &auth.actor(), query.into()).await?;

    Ok((StatusCode::OK, Json(courses.into())))
}

/// Courses the caller teaches, is enrolled in, or assists with
#[utoipa::path(
    get,
    path = "/api/v1/courses/mine",
    responses(
        (status = 200, description = "Courses", body = CourseListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn my_courses(
    auth: AuthClaims,
) -> Result<(StatusCode, Json<CourseListResponse>), AppError> {
    let db = connection()?;
    let courses = course_service::my_courses(db, &auth.actor()).await?;

    Ok((StatusCode::OK, Json(courses.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course detail", body = CourseDetailResponse),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn get_course(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<CourseDetailResponse>), AppError> {
    let db = connection()?;
    let detail = course_service::get_course(db, &auth.actor(), course_id).await?;

    Ok((StatusCode::OK, Json(detail.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 400, description = "Invalid input or stale revision"),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn update_course(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    let db = connection()?;
    let (updates, expected_revision) = payload.into_parts();
    let course =
        course_service::update_course(db, &auth.actor(), course_id, updates, expected_revision)
            .await?;

    Ok((StatusCode::OK, Json(course.into())))
}

/// Delete a course with all of its content
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn delete_course(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let db = connection()?;
    course_service::delete_course(db, &auth.actor(), course_id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::ok("Course deleted successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/courses/{course_id}/enroll",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentResponse),
        (status = 400, description = "Already enrolled"),
        (status = 403, description = "Only students can enroll"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn enroll(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), AppError> {
    let db = connection()?;
    let enrollment = course_service::enroll(db, &auth.actor(), course_id).await?;

    Ok((StatusCode::CREATED, Json(enrollment.into())))
}

/// Assign a TA to the course by email
#[utoipa::path(
    post,
    path = "/api/v1/courses/{course_id}/assign-ta",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = CourseAssignTaRequest,
    responses(
        (status = 200, description = "TA assigned", body = TaAssignmentResponse),
        (status = 400, description = "User cannot be a TA or student not enrolled"),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn assign_ta(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<CourseAssignTaRequest>,
) -> Result<(StatusCode, Json<TaAssignmentResponse>), AppError> {
    let db = connection()?;
    let assignment = ta_service::assign_ta(
        db,
        &auth.actor(),
        TaAssignmentRequest {
            course_id,
            email: payload.email,
            name: payload.name,
            student_ids: payload.student_ids,
        },
    )
    .await?;

    Ok((StatusCode::OK, Json(assignment.into())))
}

/// Toggle the publish state of a course
#[utoipa::path(
    patch,
    path = "/api/v1/courses/{course_id}/publish",
    operation_id = "toggle_course_publish",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Publish state toggled", body = CourseResponse),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn toggle_publish(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    let db = connection()?;
    let course = course_service::toggle_publish(db, &auth.actor(), course_id).await?;

    Ok((StatusCode::OK, Json(course.into())))
}
