mod common;

use course_service::domain::rating::CriteriaScores;
use course_service::entities::sea_orm_active_enums::RoleEnum;
use course_service::error::AppError;
use course_service::services::rating_service;
use test_log::test;

use crate::common::{actor, classroom, create_user, draft_course, setup_db};

fn scores(overall: i16) -> CriteriaScores {
    CriteriaScores {
        content_quality: 4,
        industry_relevance: 5,
        practical_application: 3,
        overall,
    }
}

#[test(tokio::test)]
async fn test_expert_rating_replaces_previous_one() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let expert = create_user(&db, RoleEnum::IndustryExpert, "cto@industry.io").await;
    let course_id = class.course.course_id;

    rating_service::rate_course(&db, &actor(&expert), course_id, scores(2), None)
        .await
        .unwrap();
    rating_service::rate_course(
        &db,
        &actor(&expert),
        course_id,
        scores(4),
        Some("Much improved".to_string()),
    )
    .await
    .unwrap();

    let ratings = rating_service::course_ratings(&db, course_id).await.unwrap();
    assert_eq!(ratings.ratings.len(), 1);
    assert_eq!(ratings.summary.count, 1);
    assert_eq!(ratings.summary.overall, 4.0);
    assert_eq!(ratings.summary.industry_relevance, 5.0);
}

#[test(tokio::test)]
async fn test_rating_rules() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let expert = create_user(&db, RoleEnum::IndustryExpert, "cto@industry.io").await;

    let err = rating_service::rate_course(
        &db,
        &actor(&class.student),
        class.course.course_id,
        scores(5),
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = rating_service::rate_course(
        &db,
        &actor(&expert),
        class.course.course_id,
        scores(6),
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let draft = draft_course(&db, &class.educator).await;
    let err = rating_service::rate_course(&db, &actor(&expert), draft.course_id, scores(5), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
