use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use super::{course_relationship, load_course, require_text};
use crate::domain::ordering::{next_sort_order, plan_reorder};
use crate::domain::publish::Visibility;
use crate::domain::{Action, Actor, authorize};
use crate::entities::{course, document};
use crate::error::{AppError, AppResult};
use crate::repositories::{DocumentRepository, DocumentUpdate};

#[derive(Debug)]
pub struct NewDocument {
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_type: Option<String>,
}

async fn load_document(db: &DatabaseConnection, document_id: Uuid) -> AppResult<document::Model> {
    DocumentRepository::new(db)
        .find_by_id(document_id)
        .await?
        .ok_or_else(|| AppError::not_found("Document"))
}

/// Loads the document and its course and checks that the caller manages the
/// course content.
async fn load_for_management(
    db: &DatabaseConnection,
    actor: &Actor,
    document_id: Uuid,
) -> AppResult<(document::Model, course::Model)> {
    let document = load_document(db, document_id).await?;
    let course = load_course(db, document.course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::ManageContent, &relationship)?;
    Ok((document, course))
}

pub async fn create_document(
    db: &DatabaseConnection,
    actor: &Actor,
    new_document: NewDocument,
) -> AppResult<document::Model> {
    let course = load_course(db, new_document.course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::ManageContent, &relationship)?;
    require_text("Title", &new_document.title)?;
    require_text("File URL", &new_document.file_url)?;

    let document_repo = DocumentRepository::new(db);
    let sort_order = next_sort_order(document_repo.max_sort_order(course.course_id).await?);
    let document = document_repo
        .create(
            course.course_id,
            new_document.title.trim().to_string(),
            new_document.description,
            new_document.file_url.trim().to_string(),
            new_document.file_type,
            sort_order,
        )
        .await?;

    tracing::info!(document_id = %document.document_id, course_id = %course.course_id, "document created");
    Ok(document)
}

/// Documents of a course in manual order. Drafts are only listed for the
/// owning educator and assigned TAs.
pub async fn list_documents(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
) -> AppResult<Vec<document::Model>> {
    let course = load_course(db, course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    let published_only = authorize(actor, Action::ViewDraftContent, &relationship).is_err();

    if published_only && !course.is_published {
        return Err(AppError::not_found("Course"));
    }

    Ok(DocumentRepository::new(db)
        .find_by_course(course.course_id, published_only)
        .await?)
}

pub async fn get_document(
    db: &DatabaseConnection,
    actor: &Actor,
    document_id: Uuid,
) -> AppResult<document::Model> {
    let document = load_document(db, document_id).await?;
    if document.is_published {
        return Ok(document);
    }

    let course = load_course(db, document.course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    if authorize(actor, Action::ViewDraftContent, &relationship).is_err() {
        return Err(AppError::not_found("Document"));
    }
    Ok(document)
}

pub async fn update_document(
    db: &DatabaseConnection,
    actor: &Actor,
    document_id: Uuid,
    updates: DocumentUpdate,
) -> AppResult<document::Model> {
    let (document, _) = load_for_management(db, actor, document_id).await?;
    if let Some(title) = &updates.title {
        require_text("Title", title)?;
    }
    if let Some(file_url) = &updates.file_url {
        require_text("File URL", file_url)?;
    }

    Ok(DocumentRepository::new(db).update(document, updates).await?)
}

pub async fn delete_document(db: &DatabaseConnection, actor: &Actor, document_id: Uuid) -> AppResult<()> {
    let (document, _) = load_for_management(db, actor, document_id).await?;

    let txn = db.begin().await?;
    DocumentRepository::new(&txn).delete(document.document_id).await?;
    txn.commit().await?;

    tracing::info!(document_id = %document_id, "document deleted");
    Ok(())
}

pub async fn toggle_publish(
    db: &DatabaseConnection,
    actor: &Actor,
    document_id: Uuid,
) -> AppResult<document::Model> {
    let (document, _) = load_for_management(db, actor, document_id).await?;
    let visibility = Visibility::from(document.is_published).toggled();
    Ok(DocumentRepository::new(db)
        .set_published(document, visibility.is_published())
        .await?)
}

/// Gives the listed documents `sort_order = position + 1`. Documents left out
/// keep their order.
pub async fn reorder_documents(
    db: &DatabaseConnection,
    actor: &Actor,
    course_id: Uuid,
    document_ids: Vec<Uuid>,
) -> AppResult<Vec<document::Model>> {
    let course = load_course(db, course_id).await?;
    let relationship = course_relationship(db, &course, actor.user_id).await?;
    authorize(actor, Action::ManageContent, &relationship)?;

    let txn = db.begin().await?;
    let document_repo = DocumentRepository::new(&txn);
    let plan = plan_reorder(&document_repo.ids_by_course(course.course_id).await?, &document_ids)?;
    for (document_id, sort_order) in plan {
        document_repo.set_sort_order(document_id, sort_order).await?;
    }
    let documents = document_repo.find_by_course(course.course_id, false).await?;
    txn.commit().await?;

    Ok(documents)
}
