use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{document, document_view};

pub struct DocumentRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

#[derive(Debug, Default, Clone)]
pub struct DocumentUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
}

impl<'a, C: ConnectionTrait> DocumentRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, document_id: Uuid) -> Result<Option<document::Model>, DbErr> {
        document::Entity::find_by_id(document_id).one(self.conn).await
    }

    pub async fn find_by_course(
        &self,
        course_id: Uuid,
        published_only: bool,
    ) -> Result<Vec<document::Model>, DbErr> {
        let mut query = document::Entity::find().filter(document::Column::CourseId.eq(course_id));
        if published_only {
            query = query.filter(document::Column::IsPublished.eq(true));
        }
        query
            .order_by_asc(document::Column::SortOrder)
            .order_by_asc(document::Column::CreatedAt)
            .all(self.conn)
            .await
    }

    pub async fn ids_by_course(&self, course_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        document::Entity::find()
            .select_only()
            .column(document::Column::DocumentId)
            .filter(document::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(self.conn)
            .await
    }

    pub async fn max_sort_order(&self, course_id: Uuid) -> Result<Option<i32>, DbErr> {
        let max: Option<Option<i32>> = document::Entity::find()
            .select_only()
            .column_as(document::Column::SortOrder.max(), "max_order")
            .filter(document::Column::CourseId.eq(course_id))
            .into_tuple()
            .one(self.conn)
            .await?;
        Ok(max.flatten())
    }

    pub async fn count_published(&self, course_id: Uuid) -> Result<u64, DbErr> {
        document::Entity::find()
            .filter(document::Column::CourseId.eq(course_id))
            .filter(document::Column::IsPublished.eq(true))
            .count(self.conn)
            .await
    }

    pub async fn create(
        &self,
        course_id: Uuid,
        title: String,
        description: Option<String>,
        file_url: String,
        file_type: Option<String>,
        sort_order: i32,
    ) -> Result<document::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let document = document::ActiveModel {
            document_id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            title: Set(title),
            description: Set(description),
            file_url: Set(file_url),
            file_type: Set(file_type),
            sort_order: Set(sort_order),
            is_published: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        document.insert(self.conn).await
    }

    pub async fn update(
        &self,
        document: document::Model,
        updates: DocumentUpdate,
    ) -> Result<document::Model, DbErr> {
        let mut active_model: document::ActiveModel = document.into();

        if let Some(title) = updates.title {
            active_model.title = Set(title);
        }
        if let Some(description) = updates.description {
            active_model.description = Set(Some(description));
        }
        if let Some(file_url) = updates.file_url {
            active_model.file_url = Set(file_url);
        }
        if let Some(file_type) = updates.file_type {
            active_model.file_type = Set(Some(file_type));
        }

        active_model.updated_at = Set(Utc::now().naive_utc());
        active_model.update(self.conn).await
    }

    pub async fn set_published(
        &self,
        document: document::Model,
        is_published: bool,
    ) -> Result<document::Model, DbErr> {
        let mut active_model: document::ActiveModel = document.into();
        active_model.is_published = Set(is_published);
        active_model.updated_at = Set(Utc::now().naive_utc());
        active_model.update(self.conn).await
    }

    pub async fn set_sort_order(&self, document_id: Uuid, sort_order: i32) -> Result<(), DbErr> {
        document::Entity::update_many()
            .col_expr(document::Column::SortOrder, Expr::value(sort_order))
            .col_expr(document::Column::UpdatedAt, Expr::value(Utc::now().naive_utc()))
            .filter(document::Column::DocumentId.eq(document_id))
            .exec(self.conn)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, document_id: Uuid) -> Result<(), DbErr> {
        document_view::Entity::delete_many()
            .filter(document_view::Column::DocumentId.eq(document_id))
            .exec(self.conn)
            .await?;
        document::Entity::delete_by_id(document_id)
            .exec(self.conn)
            .await?;
        Ok(())
    }
}
