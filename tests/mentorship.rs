mod common;

use course_service::domain::availability::Slot;
use course_service::entities::{mentorship_session, user};
use course_service::entities::sea_orm_active_enums::{RoleEnum, SessionStatusEnum};
use course_service::error::AppError;
use course_service::services::mentorship_service::{self, SessionRequest};
use course_service::services::ta_service::{self, TaAssignmentRequest};
use sea_orm::DatabaseConnection;
use test_log::test;

use crate::common::{Classroom, actor, classroom, create_user, in_days, setup_db};

/// Assigns an existing TA account to the classroom course.
async fn assign_ta(db: &DatabaseConnection, class: &Classroom) -> user::Model {
    let ta = create_user(db, RoleEnum::Ta, "helper@school.io").await;
    ta_service::assign_ta(
        db,
        &actor(&class.educator),
        TaAssignmentRequest {
            course_id: class.course.course_id,
            email: ta.email.clone(),
            name: None,
            student_ids: vec![class.student.user_id],
        },
    )
    .await
    .unwrap();
    ta
}

async fn book(
    db: &DatabaseConnection,
    class: &Classroom,
    ta: &user::Model,
) -> mentorship_session::Model {
    mentorship_service::create_session(
        db,
        &actor(ta),
        SessionRequest {
            course_id: class.course.course_id,
            participant_id: class.student.user_id,
            title: "Lifetimes clinic".to_string(),
            description: None,
            scheduled_at: in_days(2),
            duration_minutes: 45,
            meeting_link: Some("https://meet.example.com/clinic".to_string()),
        },
    )
    .await
    .unwrap()
}

#[test(tokio::test)]
async fn test_only_completed_sessions_can_be_rated() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let ta = assign_ta(&db, &class).await;
    let session = book(&db, &class, &ta).await;
    assert_eq!(session.status, SessionStatusEnum::Scheduled);

    let student = actor(&class.student);
    let err = mentorship_service::rate_session(&db, &student, session.session_id, 5, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let completed = mentorship_service::complete_session(
        &db,
        &actor(&ta),
        session.session_id,
        Some("Covered elision rules".to_string()),
    )
    .await
    .unwrap();
    assert_eq!(completed.status, SessionStatusEnum::Completed);

    let rated = mentorship_service::rate_session(
        &db,
        &student,
        session.session_id,
        5,
        Some("Very clear".to_string()),
    )
    .await
    .unwrap();
    assert_eq!(rated.rating, Some(5));
    assert_eq!(rated.rated_by, Some(class.student.user_id));
}

#[test(tokio::test)]
async fn test_completed_session_cannot_be_cancelled_or_started() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let ta = assign_ta(&db, &class).await;
    let session = book(&db, &class, &ta).await;
    let ta_actor = actor(&ta);

    mentorship_service::start_session(&db, &ta_actor, session.session_id)
        .await
        .unwrap();
    mentorship_service::complete_session(&db, &ta_actor, session.session_id, None)
        .await
        .unwrap();

    let err = mentorship_service::cancel_session(&db, &actor(&class.student), session.session_id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    let err = mentorship_service::start_session(&db, &ta_actor, session.session_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test(tokio::test)]
async fn test_students_cannot_start_sessions_and_outsiders_cannot_see_them() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let ta = assign_ta(&db, &class).await;
    let session = book(&db, &class, &ta).await;

    let err = mentorship_service::start_session(&db, &actor(&class.student), session.session_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let stranger = create_user(&db, RoleEnum::Student, "stranger@school.io").await;
    assert!(
        mentorship_service::get_session(&db, &actor(&stranger), session.session_id)
            .await
            .is_err()
    );
}

#[test(tokio::test)]
async fn test_sessions_need_an_enrolled_student() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let ta = assign_ta(&db, &class).await;
    let stranger = create_user(&db, RoleEnum::Student, "stranger@school.io").await;

    let err = mentorship_service::create_session(
        &db,
        &actor(&ta),
        SessionRequest {
            course_id: class.course.course_id,
            participant_id: stranger.user_id,
            title: "Office hours".to_string(),
            description: None,
            scheduled_at: in_days(1),
            duration_minutes: 30,
            meeting_link: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test(tokio::test)]
async fn test_availability_excludes_booked_hours() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let ta = assign_ta(&db, &class).await;
    let session = book(&db, &class, &ta).await;

    let day = session.scheduled_at.date();
    let availability = mentorship_service::availability(&db, ta.user_id, day)
        .await
        .unwrap();
    assert_eq!(availability.booked.len(), 1);
    let booked = Slot::new(session.scheduled_at, session.duration_minutes as i64);
    assert!(availability.free_slots.iter().all(|slot| !slot.overlaps(&booked)));

    let err = mentorship_service::availability(&db, class.student.user_id, day)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test(tokio::test)]
async fn test_promoted_ta_cannot_book_a_session_with_themselves() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let promoted = ta_service::assign_ta(
        &db,
        &actor(&class.educator),
        TaAssignmentRequest {
            course_id: class.course.course_id,
            email: class.student.email.clone(),
            name: None,
            student_ids: Vec::new(),
        },
    )
    .await
    .unwrap()
    .ta;
    assert_eq!(promoted.role, RoleEnum::Ta);

    let err = mentorship_service::create_session(
        &db,
        &actor(&promoted),
        SessionRequest {
            course_id: class.course.course_id,
            participant_id: promoted.user_id,
            title: "Solo session".to_string(),
            description: None,
            scheduled_at: in_days(1),
            duration_minutes: 30,
            meeting_link: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}
