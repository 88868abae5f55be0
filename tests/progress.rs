mod common;

use course_service::domain::progress::WatchState;
use course_service::entities::sea_orm_active_enums::RoleEnum;
use course_service::error::AppError;
use course_service::repositories::EnrollmentRepository;
use course_service::services::document_service::{self, NewDocument};
use course_service::services::lecture_service::{self, NewLecture};
use course_service::services::progress_service;
use sea_orm::DatabaseConnection;
use test_log::test;
use uuid::Uuid;

use crate::common::{Classroom, actor, classroom, create_user, setup_db};

async fn published_lecture(db: &DatabaseConnection, class: &Classroom, title: &str) -> Uuid {
    let owner = actor(&class.educator);
    let lecture = lecture_service::create_lecture(
        db,
        &owner,
        NewLecture {
            course_id: class.course.course_id,
            title: title.to_string(),
            description: None,
            video_url: Some(format!("https://videos.example.com/{title}.mp4")),
            duration: 900,
        },
    )
    .await
    .unwrap();
    lecture_service::toggle_publish(db, &owner, lecture.lecture_id)
        .await
        .unwrap()
        .lecture_id
}

async fn published_document(db: &DatabaseConnection, class: &Classroom) -> Uuid {
    let owner = actor(&class.educator);
    let document = document_service::create_document(
        db,
        &owner,
        NewDocument {
            course_id: class.course.course_id,
            title: "Cheat sheet".to_string(),
            description: None,
            file_url: "https://files.example.com/cheatsheet.pdf".to_string(),
            file_type: Some("pdf".to_string()),
        },
    )
    .await
    .unwrap();
    document_service::toggle_publish(db, &owner, document.document_id)
        .await
        .unwrap()
        .document_id
}

fn completed() -> WatchState {
    WatchState {
        watch_time: 900,
        completed: true,
    }
}

#[test(tokio::test)]
async fn test_progress_counts_completed_lectures_and_viewed_documents() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let student = actor(&class.student);

    let first = published_lecture(&db, &class, "intro").await;
    let second = published_lecture(&db, &class, "ownership").await;
    let document = published_document(&db, &class).await;

    let (_, progress) = progress_service::record_lecture_watch(&db, &student, first, completed())
        .await
        .unwrap();
    assert_eq!(progress.overall_progress, 33);

    let (_, progress) = progress_service::record_document_view(&db, &student, document)
        .await
        .unwrap();
    assert_eq!(progress.overall_progress, 67);

    let (_, progress) = progress_service::record_lecture_watch(&db, &student, second, completed())
        .await
        .unwrap();
    assert_eq!(progress.overall_progress, 100);

    let enrollment = EnrollmentRepository::new(&db)
        .find(class.course.course_id, class.student.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(enrollment.progress, 100);

    let detail = progress_service::get_course_progress(&db, &student, class.course.course_id)
        .await
        .unwrap();
    assert_eq!(detail.published_lectures, 2);
    assert_eq!(detail.published_documents, 1);
    assert_eq!(detail.watches.len(), 2);
    assert_eq!(detail.views.len(), 1);
}

#[test(tokio::test)]
async fn test_completion_is_sticky_and_watch_time_only_grows() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let student = actor(&class.student);
    let lecture = published_lecture(&db, &class, "intro").await;

    progress_service::record_lecture_watch(&db, &student, lecture, completed())
        .await
        .unwrap();
    let (watch, progress) = progress_service::record_lecture_watch(
        &db,
        &student,
        lecture,
        WatchState {
            watch_time: 30,
            completed: false,
        },
    )
    .await
    .unwrap();

    assert!(watch.completed);
    assert_eq!(watch.watch_time, 900);
    assert_eq!(progress.overall_progress, 100);
}

#[test(tokio::test)]
async fn test_unenrolled_student_cannot_track_progress() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let lecture = published_lecture(&db, &class, "intro").await;
    let outsider = create_user(&db, RoleEnum::Student, "outsider@school.io").await;

    let err = progress_service::record_lecture_watch(&db, &actor(&outsider), lecture, completed())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)), "got {err:?}");
}

#[test(tokio::test)]
async fn test_course_analytics_are_for_the_owner() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let lecture = published_lecture(&db, &class, "intro").await;
    progress_service::record_lecture_watch(&db, &actor(&class.student), lecture, completed())
        .await
        .unwrap();

    let analytics =
        progress_service::course_analytics(&db, &actor(&class.educator), class.course.course_id)
            .await
            .unwrap();
    assert_eq!(analytics.enrolled_students, 1);
    assert_eq!(analytics.completed_students, 1);
    assert_eq!(analytics.average_progress, 100.0);
    assert_eq!(analytics.students[0].student.user_id, class.student.user_id);

    let err =
        progress_service::course_analytics(&db, &actor(&class.student), class.course.course_id)
            .await
            .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[test(tokio::test)]
async fn test_viewing_a_document_twice_counts_once() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let student = actor(&class.student);
    published_lecture(&db, &class, "intro").await;
    let document = published_document(&db, &class).await;

    let (_, first) = progress_service::record_document_view(&db, &student, document)
        .await
        .unwrap();
    let (_, second) = progress_service::record_document_view(&db, &student, document)
        .await
        .unwrap();
    assert_eq!(first.overall_progress, 50);
    assert_eq!(second.overall_progress, first.overall_progress);

    let detail = progress_service::get_course_progress(&db, &student, class.course.course_id)
        .await
        .unwrap();
    assert_eq!(detail.views.len(), 1);
}
