use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::domain::rating::CriteriaScores;
use crate::entities::industry_rating;

pub struct IndustryRatingRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> IndustryRatingRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_course(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<industry_rating::Model>, DbErr> {
        industry_rating::Entity::find()
            .filter(industry_rating::Column::CourseId.eq(course_id))
            .order_by_desc(industry_rating::Column::UpdatedAt)
            .all(self.conn)
            .await
    }

    /// One rating per expert and course; rating again replaces the scores.
    pub async fn upsert(
        &self,
        course_id: Uuid,
        expert_id: Uuid,
        scores: CriteriaScores,
        feedback: Option<String>,
    ) -> Result<industry_rating::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let existing = industry_rating::Entity::find_by_id((course_id, expert_id))
            .one(self.conn)
            .await?;

        match existing {
            Some(rating) => {
                let mut active_model: industry_rating::ActiveModel = rating.into();
                active_model.content_quality = Set(scores.content_quality);
                active_model.industry_relevance = Set(scores.industry_relevance);
                active_model.practical_application = Set(scores.practical_application);
                active_model.overall = Set(scores.overall);
                active_model.feedback = Set(feedback);
                active_model.updated_at = Set(now);
                active_model.update(self.conn).await
            }
            None => {
                let rating = industry_rating::ActiveModel {
                    course_id: Set(course_id),
                    expert_id: Set(expert_id),
                    content_quality: Set(scores.content_quality),
                    industry_relevance: Set(scores.industry_relevance),
                    practical_application: Set(scores.practical_application),
                    overall: Set(scores.overall),
                    feedback: Set(feedback),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                rating.insert(self.conn).await
            }
        }
    }
}
