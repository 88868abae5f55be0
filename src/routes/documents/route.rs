use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, patch, post, put},
};
use uuid::Uuid;

use super::dto::{CreateDocumentRequest, DocumentResponse, UpdateDocumentRequest};
use crate::entities::document;
use crate::error::AppError;
use crate::extractor::AuthClaims;
use crate::routes::MessageResponse;
use crate::routes::lectures::dto::ReorderRequest;
use crate::services::document_service;
use crate::static_service::connection;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/documents", post(create_document))
        .route("/api/v1/documents/course/{course_id}", get(list_documents))
        .route(
            "/api/v1/documents/course/{course_id}/reorder",
            put(reorder_documents),
        )
        .route(
            "/api/v1/documents/{document_id}",
            get(get_document).put(update_document).delete(delete_document),
        )
        .route("/api/v1/documents/{document_id}/publish", patch(toggle_publish))
}

fn list_response(documents: Vec<document::Model>) -> Json<Vec<DocumentResponse>> {
    Json(documents.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    post,
    path = "/api/v1/documents",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document created", body = DocumentResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
pub async fn create_document(
    auth: AuthClaims,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), AppError> {
    let db = connection()?;
    let document = document_service::create_document(db, &auth.actor(), payload.into()).await?;

    Ok((StatusCode::CREATED, Json(document.into())))
}

/// Documents of a course; drafts only for the owner and assigned TAs
#[utoipa::path(
    get,
    path = "/api/v1/documents/course/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Documents in order", body = Vec<DocumentResponse>),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
pub async fn list_documents(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Vec<DocumentResponse>>), AppError> {
    let db = connection()?;
    let documents = document_service::list_documents(db, &auth.actor(), course_id).await?;

    Ok((StatusCode::OK, list_response(documents)))
}

#[utoipa::path(
    get,
    path = "/api/v1/documents/{document_id}",
    params(("document_id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document", body = DocumentResponse),
        (status = 404, description = "Document not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
pub async fn get_document(
    auth: AuthClaims,
    Path(document_id): Path<Uuid>,
) -> Result<(StatusCode, Json<DocumentResponse>), AppError> {
    let db = connection()?;
    let document = document_service::get_document(db, &auth.actor(), document_id).await?;

    Ok((StatusCode::OK, Json(document.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/documents/{document_id}",
    params(("document_id" = Uuid, Path, description = "Document ID")),
    request_body = UpdateDocumentRequest,
    responses(
        (status = 200, description = "Document updated", body = DocumentResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Document not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
pub async fn update_document(
    auth: AuthClaims,
    Path(document_id): Path<Uuid>,
    Json(payload): Json<UpdateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), AppError> {
    let db = connection()?;
    let document =
        document_service::update_document(db, &auth.actor(), document_id, payload.into()).await?;

    Ok((StatusCode::OK, Json(document.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/documents/{document_id}",
    params(("document_id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document deleted", body = MessageResponse),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Document not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
pub async fn delete_document(
    auth: AuthClaims,
    Path(document_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let db = connection()?;
    document_service::delete_document(db, &auth.actor(), document_id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::ok("Document deleted successfully")),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/v1/documents/{document_id}/publish",
    operation_id = "toggle_document_publish",
    params(("document_id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Publish state toggled", body = DocumentResponse),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Document not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
pub async fn toggle_publish(
    auth: AuthClaims,
    Path(document_id): Path<Uuid>,
) -> Result<(StatusCode, Json<DocumentResponse>), AppError> {
    let db = connection()?;
    let document = document_service::toggle_publish(db, &auth.actor(), document_id).await?;

    Ok((StatusCode::OK, Json(document.into())))
}

/// Reorder documents; omitted documents keep their position
#[utoipa::path(
    put,
    path = "/api/v1/documents/course/{course_id}/reorder",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Documents in their new order", body = Vec<DocumentResponse>),
        (status = 400, description = "Unknown or repeated document ID"),
        (status = 403, description = "Not the course owner"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Documents"
)]
pub async fn reorder_documents(
    auth: AuthClaims,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<ReorderRequest>,
) -> Result<(StatusCode, Json<Vec<DocumentResponse>>), AppError> {
    let db = connection()?;
    let documents =
        document_service::reorder_documents(db, &auth.actor(), course_id, payload.ids).await?;

    Ok((StatusCode::OK, list_response(documents)))
}
