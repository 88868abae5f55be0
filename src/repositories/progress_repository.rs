use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use crate::domain::progress::WatchState;
use crate::entities::{document, document_view, lecture, lecture_watch, student_progress};

pub struct ProgressRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ProgressRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<student_progress::Model>, DbErr> {
        student_progress::Entity::find_by_id((student_id, course_id))
            .one(self.conn)
            .await
    }

    pub async fn find_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<student_progress::Model>, DbErr> {
        student_progress::Entity::find()
            .filter(student_progress::Column::StudentId.eq(student_id))
            .order_by_desc(student_progress::Column::LastAccessedAt)
            .all(self.conn)
            .await
    }

    /// Returns the progress row of the pair, creating an empty one first.
    pub async fn find_or_create(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<student_progress::Model, DbErr> {
        if let Some(progress) = self.find(student_id, course_id).await? {
            return Ok(progress);
        }
        let now = Utc::now().naive_utc();
        let progress = student_progress::ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            overall_progress: Set(0),
            last_accessed_at: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
        };
        progress.insert(self.conn).await
    }

    pub async fn save_overall(
        &self,
        progress: student_progress::Model,
        overall_progress: i32,
    ) -> Result<student_progress::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let mut active_model: student_progress::ActiveModel = progress.into();
        active_model.overall_progress = Set(overall_progress);
        active_model.last_accessed_at = Set(now);
        active_model.updated_at = Set(now);
        active_model.update(self.conn).await
    }

    pub async fn find_watch(
        &self,
        student_id: Uuid,
        lecture_id: Uuid,
    ) -> Result<Option<lecture_watch::Model>, DbErr> {
        lecture_watch::Entity::find_by_id((student_id, lecture_id))
            .one(self.conn)
            .await
    }

    pub async fn find_watches(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Vec<lecture_watch::Model>, DbErr> {
        lecture_watch::Entity::find()
            .filter(lecture_watch::Column::StudentId.eq(student_id))
            .filter(lecture_watch::Column::CourseId.eq(course_id))
            .all(self.conn)
            .await
    }

    pub async fn save_watch(
        &self,
        existing: Option<lecture_watch::Model>,
        student_id: Uuid,
        lecture: &lecture::Model,
        state: WatchState,
    ) -> Result<lecture_watch::Model, DbErr> {
        let now = Utc::now().naive_utc();
        match existing {
            Some(watch) => {
                let mut active_model: lecture_watch::ActiveModel = watch.into();
                active_model.watch_time = Set(state.watch_time);
                active_model.completed = Set(state.completed);
                active_model.last_watched_at = Set(now);
                active_model.update(self.conn).await
            }
            None => {
                let watch = lecture_watch::ActiveModel {
                    student_id: Set(student_id),
                    lecture_id: Set(lecture.lecture_id),
                    course_id: Set(lecture.course_id),
                    watch_time: Set(state.watch_time),
                    completed: Set(state.completed),
                    last_watched_at: Set(now),
                };
                watch.insert(self.conn).await
            }
        }
    }

    pub async fn find_views(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Vec<document_view::Model>, DbErr> {
        document_view::Entity::find()
            .filter(document_view::Column::StudentId.eq(student_id))
            .filter(document_view::Column::CourseId.eq(course_id))
            .all(self.conn)
            .await
    }

    /// Records a view; a repeated view only refreshes the timestamp.
    pub async fn record_view(
        &self,
        student_id: Uuid,
        document: &document::Model,
    ) -> Result<document_view::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let existing = document_view::Entity::find_by_id((student_id, document.document_id))
            .one(self.conn)
            .await?;

        match existing {
            Some(view) => {
                let mut active_model: document_view::ActiveModel = view.into();
                active_model.viewed_at = Set(now);
                active_model.update(self.conn).await
            }
            None => {
                let view = document_view::ActiveModel {
                    student_id: Set(student_id),
                    document_id: Set(document.document_id),
                    course_id: Set(document.course_id),
                    viewed_at: Set(now),
                };
                view.insert(self.conn).await
            }
        }
    }

    /// Completed watches of lectures that are currently published.
    pub async fn count_completed_published_lectures(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<u64, DbErr> {
        lecture_watch::Entity::find()
            .join(JoinType::InnerJoin, lecture_watch::Relation::Lecture.def())
            .filter(lecture_watch::Column::StudentId.eq(student_id))
            .filter(lecture_watch::Column::CourseId.eq(course_id))
            .filter(lecture_watch::Column::Completed.eq(true))
            .filter(lecture::Column::IsPublished.eq(true))
            .count(self.conn)
            .await
    }

    /// Views of documents that are currently published.
    pub async fn count_viewed_published_documents(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<u64, DbErr> {
        document_view::Entity::find()
            .join(JoinType::InnerJoin, document_view::Relation::Document.def())
            .filter(document_view::Column::StudentId.eq(student_id))
            .filter(document_view::Column::CourseId.eq(course_id))
            .filter(document::Column::IsPublished.eq(true))
            .count(self.conn)
            .await
    }
}
