use axum::{Json, Router, extract::Path, http::StatusCode, routing::post};
use uuid::Uuid;

use super::dto::{CourseRatingsResponse, IndustryRatingResponse, RateCourseRequest};
use crate::error::AppError;
use crate::extractor::AuthClaims;
use crate::services::rating_service;
use crate::static_service::connection;

pub fn create_route() -> Router {
    Router::new().route(
        "/api/v1/industry-ratings/{course_id}",
        post(rate_course).get(course_ratings),
    )
}

#[utoipa::path(
    post,
    path = "/api/v1/industry-ratings/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = RateCourseRequest,
    responses(
        (status = 200, description = "Rating stored", body = IndustryRatingResponse),
        (status = 400, description = "Score out of range"),
        (status = 403, description = "Only industry experts may rate"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Industry Ratings"
)]
pub async fn rate_course(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<RateCourseRequest>,
) -> Result<(StatusCode, Json<IndustryRatingResponse>), AppError> {
    let db = connection()?;
    let (scores, feedback) = payload.into_parts();
    let rating =
        rating_service::rate_course(db, &auth.actor(), course_id, scores, feedback).await?;

    Ok((StatusCode::OK, Json(rating.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/industry-ratings/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Rating summary and individual ratings", body = CourseRatingsResponse),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Industry Ratings"
)]
pub async fn course_ratings(
    _auth: AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<CourseRatingsResponse>), AppError> {
    let db = connection()?;
    let ratings = rating_service::course_ratings(db, course_id).await?;

    Ok((StatusCode::OK, Json(ratings.into())))
}
