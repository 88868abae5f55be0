use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::rating::{CriteriaScores, RatingSummary};
use crate::entities::industry_rating;
use crate::services::rating_service::CourseRatings;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateCourseRequest {
    #[schema(minimum = 1, maximum = 5)]
    pub content_quality: i16,
    #[schema(minimum = 1, maximum = 5)]
    pub industry_relevance: i16,
    #[schema(minimum = 1, maximum = 5)]
    pub practical_application: i16,
    #[schema(minimum = 1, maximum = 5)]
    pub overall: i16,
    pub feedback: Option<String>,
}

impl RateCourseRequest {
    pub fn into_parts(self) -> (CriteriaScores, Option<String>) {
        (
            CriteriaScores {
                content_quality: self.content_quality,
                industry_relevance: self.industry_relevance,
                practical_application: self.practical_application,
                overall: self.overall,
            },
            self.feedback,
        )
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IndustryRatingResponse {
    pub course_id: Uuid,
    pub expert_id: Uuid,
    pub content_quality: i16,
    pub industry_relevance: i16,
    pub practical_application: i16,
    pub overall: i16,
    pub feedback: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<industry_rating::Model> for IndustryRatingResponse {
    fn from(rating: industry_rating::Model) -> Self {
        Self {
            course_id: rating.course_id,
            expert_id: rating.expert_id,
            content_quality: rating.content_quality,
            industry_relevance: rating.industry_relevance,
            practical_application: rating.practical_application,
            overall: rating.overall,
            feedback: rating.feedback,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingSummaryResponse {
    pub count: usize,
    pub content_quality: f64,
    pub industry_relevance: f64,
    pub practical_application: f64,
    pub overall: f64,
}

impl From<RatingSummary> for RatingSummaryResponse {
    fn from(summary: RatingSummary) -> Self {
        Self {
            count: summary.count,
            content_quality: summary.content_quality,
            industry_relevance: summary.industry_relevance,
            practical_application: summary.practical_application,
            overall: summary.overall,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseRatingsResponse {
    pub course_id: Uuid,
    pub summary: RatingSummaryResponse,
    pub ratings: Vec<IndustryRatingResponse>,
}

impl From<CourseRatings> for CourseRatingsResponse {
    fn from(value: CourseRatings) -> Self {
        Self {
            course_id: value.course_id,
            summary: value.summary.into(),
            ratings: value.ratings.into_iter().map(Into::into).collect(),
        }
    }
}
