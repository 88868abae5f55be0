use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};

use super::dto::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse};
use crate::error::AppError;
use crate::extractor::{AuthClaims, JWT_MANAGER};
use crate::services::auth_service::{self, ProfileChanges, Registration};
use crate::static_service::connection;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route(
            "/api/v1/auth/profile",
            get(get_profile).put(update_profile),
        )
}

/// Register a new account and return a JWT
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid input or email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn register(
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let db = connection()?;
    let session = auth_service::register(
        db,
        &JWT_MANAGER,
        Registration {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role: payload.role,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// Login endpoint - returns JWT token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let db = connection()?;
    let session = auth_service::login(db, &JWT_MANAGER, &payload.email, &payload.password).await?;

    Ok((StatusCode::OK, Json(session.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/profile",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn get_profile(
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let db = connection()?;
    let user = auth_service::get_profile(db, auth_claims.user_id).await?;

    Ok((StatusCode::OK, Json(user.into())))
}

/// Update profile fields; changing the password requires the current one
#[utoipa::path(
    put,
    path = "/api/v1/auth/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn update_profile(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let db = connection()?;
    let user = auth_service::update_profile(
        db,
        auth_claims.user_id,
        ProfileChanges {
            name: payload.name,
            bio: payload.bio,
            avatar: payload.avatar,
            current_password: payload.current_password,
            new_password: payload.new_password,
        },
    )
    .await?;

    Ok((StatusCode::OK, Json(user.into())))
}
