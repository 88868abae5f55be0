use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::mentorship_session;
use crate::entities::sea_orm_active_enums::SessionStatusEnum;

pub struct MentorshipRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

pub struct NewSession {
    pub ta_id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: NaiveDateTime,
    pub duration_minutes: i32,
    pub meeting_link: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct SessionUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub duration_minutes: Option<i32>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
}

impl<'a, C: ConnectionTrait> MentorshipRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(
        &self,
        session_id: Uuid,
    ) -> Result<Option<mentorship_session::Model>, DbErr> {
        mentorship_session::Entity::find_by_id(session_id)
            .one(self.conn)
            .await
    }

    pub async fn create(&self, session: NewSession) -> Result<mentorship_session::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let session = mentorship_session::ActiveModel {
            session_id: Set(Uuid::new_v4()),
            ta_id: Set(session.ta_id),
            student_id: Set(session.student_id),
            course_id: Set(session.course_id),
            title: Set(session.title),
            description: Set(session.description),
            scheduled_at: Set(session.scheduled_at),
            duration_minutes: Set(session.duration_minutes),
            meeting_link: Set(session.meeting_link),
            status: Set(SessionStatusEnum::Scheduled),
            notes: Set(None),
            rating: Set(None),
            rating_feedback: Set(None),
            rated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        session.insert(self.conn).await
    }

    pub async fn update(
        &self,
        session: mentorship_session::Model,
        updates: SessionUpdate,
    ) -> Result<mentorship_session::Model, DbErr> {
        let mut active_model: mentorship_session::ActiveModel = session.into();

        if let Some(title) = updates.title {
            active_model.title = Set(title);
        }
        if let Some(description) = updates.description {
            active_model.description = Set(Some(description));
        }
        if let Some(scheduled_at) = updates.scheduled_at {
            active_model.scheduled_at = Set(scheduled_at);
        }
        if let Some(duration) = updates.duration_minutes {
            active_model.duration_minutes = Set(duration);
        }
        if let Some(link) = updates.meeting_link {
            active_model.meeting_link = Set(Some(link));
        }
        if let Some(notes) = updates.notes {
            active_model.notes = Set(Some(notes));
        }

        active_model.updated_at = Set(Utc::now().naive_utc());
        active_model.update(self.conn).await
    }

    pub async fn set_status(
        &self,
        session: mentorship_session::Model,
        status: SessionStatusEnum,
        notes: Option<String>,
    ) -> Result<mentorship_session::Model, DbErr> {
        let mut active_model: mentorship_session::ActiveModel = session.into();
        active_model.status = Set(status);
        if let Some(notes) = notes {
            active_model.notes = Set(Some(notes));
        }
        active_model.updated_at = Set(Utc::now().naive_utc());
        active_model.update(self.conn).await
    }

    pub async fn rate(
        &self,
        session: mentorship_session::Model,
        rating: i16,
        feedback: Option<String>,
        rated_by: Uuid,
    ) -> Result<mentorship_session::Model, DbErr> {
        let mut active_model: mentorship_session::ActiveModel = session.into();
        active_model.rating = Set(Some(rating));
        active_model.rating_feedback = Set(feedback);
        active_model.rated_by = Set(Some(rated_by));
        active_model.updated_at = Set(Utc::now().naive_utc());
        active_model.update(self.conn).await
    }

    /// Sessions where the user is either the TA or the student.
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
        status: Option<SessionStatusEnum>,
    ) -> Result<Vec<mentorship_session::Model>, DbErr> {
        let mut query = mentorship_session::Entity::find().filter(
            Condition::any()
                .add(mentorship_session::Column::TaId.eq(user_id))
                .add(mentorship_session::Column::StudentId.eq(user_id)),
        );
        if let Some(status) = status {
            query = query.filter(mentorship_session::Column::Status.eq(status));
        }
        query
            .order_by_asc(mentorship_session::Column::ScheduledAt)
            .all(self.conn)
            .await
    }

    pub async fn find_by_course(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<mentorship_session::Model>, DbErr> {
        mentorship_session::Entity::find()
            .filter(mentorship_session::Column::CourseId.eq(course_id))
            .order_by_asc(mentorship_session::Column::ScheduledAt)
            .all(self.conn)
            .await
    }

    pub async fn find_by_ta_in_course(
        &self,
        ta_id: Uuid,
        course_id: Uuid,
    ) -> Result<Vec<mentorship_session::Model>, DbErr> {
        mentorship_session::Entity::find()
            .filter(mentorship_session::Column::TaId.eq(ta_id))
            .filter(mentorship_session::Column::CourseId.eq(course_id))
            .order_by_asc(mentorship_session::Column::ScheduledAt)
            .all(self.conn)
            .await
    }

    /// Non-cancelled sessions of the TA starting inside `[from, to)`.
    pub async fn find_booked_between(
        &self,
        ta_id: Uuid,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<mentorship_session::Model>, DbErr> {
        mentorship_session::Entity::find()
            .filter(mentorship_session::Column::TaId.eq(ta_id))
            .filter(mentorship_session::Column::ScheduledAt.gte(from))
            .filter(mentorship_session::Column::ScheduledAt.lt(to))
            .filter(mentorship_session::Column::Status.ne(SessionStatusEnum::Cancelled))
            .order_by_asc(mentorship_session::Column::ScheduledAt)
            .all(self.conn)
            .await
    }
}
