use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{lecture, lecture_watch};

pub struct LectureRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

#[derive(Debug, Default, Clone)]
pub struct LectureUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<i32>,
}

impl<'a, C: ConnectionTrait> LectureRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, lecture_id: Uuid) -> Result<Option<lecture::Model>, DbErr> {
        lecture::Entity::find_by_id(lecture_id).one(self.conn).await
    }

    pub async fn find_by_course(
        &self,
        course_id: Uuid,
        published_only: bool,
    ) -> Result<Vec<lecture::Model>, DbErr> {
        let mut query = lecture::Entity::find().filter(lecture::Column::CourseId.eq(course_id));
        if published_only {
            query = query.filter(lecture::Column::IsPublished.eq(true));
        }
        query
            .order_by_asc(lecture::Column::SortOrder)
            .order_by_asc(lecture::Column::CreatedAt)
            .all(self.conn)
            .await
    }

    pub async fn ids_by_course(&self, course_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        lecture::Entity::find()
            .select_only()
            .column(lecture::Column::LectureId)
            .filter(lecture::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(self.conn)
            .await
    }

    pub async fn max_sort_order(&self, course_id: Uuid) -> Result<Option<i32>, DbErr> {
        let max: Option<Option<i32>> = lecture::Entity::find()
            .select_only()
            .column_as(lecture::Column::SortOrder.max(), "max_order")
            .filter(lecture::Column::CourseId.eq(course_id))
            .into_tuple()
            .one(self.conn)
            .await?;
        Ok(max.flatten())
    }

    pub async fn count_published(&self, course_id: Uuid) -> Result<u64, DbErr> {
        lecture::Entity::find()
            .filter(lecture::Column::CourseId.eq(course_id))
            .filter(lecture::Column::IsPublished.eq(true))
            .count(self.conn)
            .await
    }

    pub async fn create(
        &self,
        course_id: Uuid,
        title: String,
        description: Option<String>,
        video_url: Option<String>,
        duration: i32,
        sort_order: i32,
    ) -> Result<lecture::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let lecture = lecture::ActiveModel {
            lecture_id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            title: Set(title),
            description: Set(description),
            video_url: Set(video_url),
            duration: Set(duration),
            sort_order: Set(sort_order),
            is_published: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        lecture.insert(self.conn).await
    }

    pub async fn update(
        &self,
        lecture: lecture::Model,
        updates: LectureUpdate,
    ) -> Result<lecture::Model, DbErr> {
        let mut active_model: lecture::ActiveModel = lecture.into();

        if let Some(title) = updates.title {
            active_model.title = Set(title);
        }
        if let Some(description) = updates.description {
            active_model.description = Set(Some(description));
        }
        if let Some(video_url) = updates.video_url {
            active_model.video_url = Set(Some(video_url));
        }
        if let Some(duration) = updates.duration {
            active_model.duration = Set(duration);
        }

        active_model.updated_at = Set(Utc::now().naive_utc());
        active_model.update(self.conn).await
    }

    pub async fn set_published(
        &self,
        lecture: lecture::Model,
        is_published: bool,
    ) -> Result<lecture::Model, DbErr> {
        let mut active_model: lecture::ActiveModel = lecture.into();
        active_model.is_published = Set(is_published);
        active_model.updated_at = Set(Utc::now().naive_utc());
        active_model.update(self.conn).await
    }

    pub async fn set_sort_order(&self, lecture_id: Uuid, sort_order: i32) -> Result<(), DbErr> {
        lecture::Entity::update_many()
            .col_expr(lecture::Column::SortOrder, Expr::value(sort_order))
            .col_expr(lecture::Column::UpdatedAt, Expr::value(Utc::now().naive_utc()))
            .filter(lecture::Column::LectureId.eq(lecture_id))
            .exec(self.conn)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, lecture_id: Uuid) -> Result<(), DbErr> {
        lecture_watch::Entity::delete_many()
            .filter(lecture_watch::Column::LectureId.eq(lecture_id))
            .exec(self.conn)
            .await?;
        lecture::Entity::delete_by_id(lecture_id)
            .exec(self.conn)
            .await?;
        Ok(())
    }
}
