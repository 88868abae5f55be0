//! Rating arithmetic for industry course ratings and mentorship sessions.

use crate::entities::industry_rating;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriteriaScores {
    pub content_quality: i16,
    pub industry_relevance: i16,
    pub practical_application: i16,
    pub overall: i16,
}

impl CriteriaScores {
    pub fn validate(&self) -> AppResult<()> {
        let criteria = [
            ("content_quality", self.content_quality),
            ("industry_relevance", self.industry_relevance),
            ("practical_application", self.practical_application),
            ("overall", self.overall),
        ];
        for (name, score) in criteria {
            if !(1..=5).contains(&score) {
                return Err(AppError::Validation(format!(
                    "{name} must be between 1 and 5"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub count: usize,
    pub content_quality: f64,
    pub industry_relevance: f64,
    pub practical_application: f64,
    pub overall: f64,
}

/// Rounds to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn mean(values: impl Iterator<Item = i16>) -> Option<f64> {
    let (sum, count) = values.fold((0i64, 0usize), |(sum, count), v| (sum + v as i64, count + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}

pub fn summarize(ratings: &[industry_rating::Model]) -> RatingSummary {
    if ratings.is_empty() {
        return RatingSummary::default();
    }
    let criterion = |pick: fn(&industry_rating::Model) -> i16| {
        mean(ratings.iter().map(pick)).map(round1).unwrap_or_default()
    };

    RatingSummary {
        count: ratings.len(),
        content_quality: criterion(|r| r.content_quality),
        industry_relevance: criterion(|r| r.industry_relevance),
        practical_application: criterion(|r| r.practical_application),
        overall: criterion(|r| r.overall),
    }
}

/// Mean session rating, `None` when nothing was rated.
pub fn average_rating(ratings: impl Iterator<Item = i16>) -> Option<f64> {
    mean(ratings).map(round1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn rating(content: i16, relevance: i16, practical: i16, overall: i16) -> industry_rating::Model {
        let now = Utc::now().naive_utc();
        industry_rating::Model {
            course_id: Uuid::new_v4(),
            expert_id: Uuid::new_v4(),
            content_quality: content,
            industry_relevance: relevance,
            practical_application: practical,
            overall,
            feedback: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_scores_must_be_in_range() {
        let ok = CriteriaScores {
            content_quality: 1,
            industry_relevance: 5,
            practical_application: 3,
            overall: 4,
        };
        assert!(ok.validate().is_ok());
        assert!(CriteriaScores { overall: 0, ..ok }.validate().is_err());
        assert!(CriteriaScores { content_quality: 6, ..ok }.validate().is_err());
    }

    #[test]
    fn test_summary_means() {
        let summary = summarize(&[rating(5, 4, 3, 4), rating(4, 4, 4, 5), rating(3, 5, 4, 4)]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.content_quality, 4.0);
        assert_eq!(summary.industry_relevance, 4.3);
        assert_eq!(summary.practical_application, 3.7);
        assert_eq!(summary.overall, 4.3);
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(summarize(&[]), RatingSummary::default());
    }

    #[test]
    fn test_average_session_rating() {
        assert_eq!(average_rating([5i16, 4, 4].into_iter()), Some(4.3));
        assert_eq!(average_rating(std::iter::empty()), None);
    }
}
