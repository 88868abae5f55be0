use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::document;
use crate::repositories::DocumentUpdate;
use crate::services::document_service::NewDocument;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "https://cdn.example.com/notes/week1.pdf")]
    pub file_url: String,
    #[schema(example = "pdf")]
    pub file_type: Option<String>,
}

impl From<CreateDocumentRequest> for NewDocument {
    fn from(request: CreateDocumentRequest) -> Self {
        Self {
            course_id: request.course_id,
            title: request.title,
            description: request.description,
            file_url: request.file_url,
            file_type: request.file_type,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
}

impl From<UpdateDocumentRequest> for DocumentUpdate {
    fn from(request: UpdateDocumentRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            file_url: request.file_url,
            file_type: request.file_type,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentResponse {
    pub document_id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_type: Option<String>,
    pub sort_order: i32,
    pub is_published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<document::Model> for DocumentResponse {
    fn from(document: document::Model) -> Self {
        Self {
            document_id: document.document_id,
            course_id: document.course_id,
            title: document.title,
            description: document.description,
            file_url: document.file_url,
            file_type: document.file_type,
            sort_order: document.sort_order,
            is_published: document.is_published,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}
