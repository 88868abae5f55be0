mod common;

use course_service::entities::sea_orm_active_enums::RoleEnum;
use course_service::error::AppError;
use course_service::repositories::{CourseFilter, CourseRepository, CourseUpdate};
use course_service::services::assignment_service::{self, NewAssignment};
use course_service::services::course_service as courses;
use course_service::services::document_service::{self, NewDocument};
use course_service::services::lecture_service::{self, NewLecture};
use course_service::services::ta_service::{self, TaAssignmentRequest};
use test_log::test;
use uuid::Uuid;

use crate::common::{
    actor, classroom, create_user, draft_course, in_days, published_course, setup_db,
};

#[test(tokio::test)]
async fn test_enrolling_twice_is_a_conflict() {
    let db = setup_db().await;
    let class = classroom(&db).await;

    let err = courses::enroll(&db, &actor(&class.student), class.course.course_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");

    let mine = courses::my_courses(&db, &actor(&class.student))
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
}

#[test(tokio::test)]
async fn test_draft_course_cannot_be_enrolled_or_seen_by_students() {
    let db = setup_db().await;
    let educator = create_user(&db, RoleEnum::Educator, "owner@school.io").await;
    let student = create_user(&db, RoleEnum::Student, "curious@school.io").await;
    let course = draft_course(&db, &educator).await;

    let err = courses::enroll(&db, &actor(&student), course.course_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = courses::get_course(&db, &actor(&student), course.course_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let detail = courses::get_course(&db, &actor(&educator), course.course_id)
        .await
        .unwrap();
    assert_eq!(detail.course.course_id, course.course_id);

    let listed = courses::list_courses(&db, &actor(&student), CourseFilter::default())
        .await
        .unwrap();
    assert!(listed.is_empty());
    let listed = courses::list_courses(&db, &actor(&educator), CourseFilter::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[test(tokio::test)]
async fn test_only_the_owner_edits_a_course() {
    let db = setup_db().await;
    let owner = create_user(&db, RoleEnum::Educator, "owner@school.io").await;
    let other = create_user(&db, RoleEnum::Educator, "rival@school.io").await;
    let course = published_course(&db, &owner).await;

    let err = courses::update_course(
        &db,
        &actor(&other),
        course.course_id,
        CourseUpdate {
            title: Some("Hijacked".to_string()),
            ..CourseUpdate::default()
        },
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = courses::delete_course(&db, &actor(&other), course.course_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[test(tokio::test)]
async fn test_stale_revision_is_rejected() {
    let db = setup_db().await;
    let educator = create_user(&db, RoleEnum::Educator, "owner@school.io").await;
    let course = draft_course(&db, &educator).await;
    let revision = course.revision;

    let updated = courses::update_course(
        &db,
        &actor(&educator),
        course.course_id,
        CourseUpdate {
            title: Some("Practical Rust, 2nd edition".to_string()),
            ..CourseUpdate::default()
        },
        Some(revision),
    )
    .await
    .unwrap();
    assert_eq!(updated.revision, revision + 1);

    let err = courses::update_course(
        &db,
        &actor(&educator),
        course.course_id,
        CourseUpdate {
            category: Some("systems".to_string()),
            ..CourseUpdate::default()
        },
        Some(revision),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");

    // A writer holding the old row loses the race at the storage layer too.
    let outcome = CourseRepository::new(&db)
        .update(
            course,
            CourseUpdate {
                description: Some("stale".to_string()),
                ..CourseUpdate::default()
            },
        )
        .await
        .unwrap();
    assert!(outcome.is_none());
}

#[test(tokio::test)]
async fn test_reorder_assigns_positions_in_request_order() {
    let db = setup_db().await;
    let educator = create_user(&db, RoleEnum::Educator, "owner@school.io").await;
    let course = draft_course(&db, &educator).await;
    let owner = actor(&educator);

    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let lecture = lecture_service::create_lecture(
            &db,
            &owner,
            NewLecture {
                course_id: course.course_id,
                title: title.to_string(),
                description: None,
                video_url: None,
                duration: 600,
            },
        )
        .await
        .unwrap();
        ids.push(lecture.lecture_id);
    }
    let (a, b, c) = (ids[0], ids[1], ids[2]);

    let lectures = lecture_service::reorder_lectures(&db, &owner, course.course_id, vec![c, a, b])
        .await
        .unwrap();
    let order_of = |id: Uuid| {
        lectures
            .iter()
            .find(|l| l.lecture_id == id)
            .map(|l| l.sort_order)
            .unwrap()
    };
    assert_eq!(order_of(c), 1);
    assert_eq!(order_of(a), 2);
    assert_eq!(order_of(b), 3);

    let err = lecture_service::reorder_lectures(
        &db,
        &owner,
        course.course_id,
        vec![a, Uuid::new_v4()],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test(tokio::test)]
async fn test_deleting_a_course_removes_its_enrollments() {
    let db = setup_db().await;
    let class = classroom(&db).await;

    courses::delete_course(&db, &actor(&class.educator), class.course.course_id)
        .await
        .unwrap();

    let mine = courses::my_courses(&db, &actor(&class.student))
        .await
        .unwrap();
    assert!(mine.is_empty());
    let err = courses::get_course(&db, &actor(&class.educator), class.course.course_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

fn document(course_id: Uuid, title: &str) -> NewDocument {
    NewDocument {
        course_id,
        title: title.to_string(),
        description: None,
        file_url: format!("https://files.example.com/{title}.pdf"),
        file_type: Some("pdf".to_string()),
    }
}

#[test(tokio::test)]
async fn test_partial_document_reorder_leaves_the_rest_alone() {
    let db = setup_db().await;
    let educator = create_user(&db, RoleEnum::Educator, "owner@school.io").await;
    let course = draft_course(&db, &educator).await;
    let owner = actor(&educator);

    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let created = document_service::create_document(&db, &owner, document(course.course_id, title))
            .await
            .unwrap();
        ids.push(created.document_id);
    }
    let (a, b, c) = (ids[0], ids[1], ids[2]);

    let documents = document_service::reorder_documents(&db, &owner, course.course_id, vec![c])
        .await
        .unwrap();
    let order_of = |id: Uuid| {
        documents
            .iter()
            .find(|d| d.document_id == id)
            .map(|d| d.sort_order)
            .unwrap()
    };
    assert_eq!(order_of(c), 1);
    assert_eq!(order_of(a), 1);
    assert_eq!(order_of(b), 2);
}

#[test(tokio::test)]
async fn test_drafts_are_hidden_from_students_but_not_from_staff() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let owner = actor(&class.educator);
    let course_id = class.course.course_id;

    let helper = create_user(&db, RoleEnum::Ta, "helper@school.io").await;
    ta_service::assign_ta(
        &db,
        &owner,
        TaAssignmentRequest {
            course_id,
            email: helper.email.clone(),
            name: None,
            student_ids: Vec::new(),
        },
    )
    .await
    .unwrap();

    let mut drafts = None;
    for (title, publish) in [("live", true), ("draft", false)] {
        let lecture = lecture_service::create_lecture(
            &db,
            &owner,
            NewLecture {
                course_id,
                title: title.to_string(),
                description: None,
                video_url: None,
                duration: 600,
            },
        )
        .await
        .unwrap();
        let document = document_service::create_document(&db, &owner, document(course_id, title))
            .await
            .unwrap();
        let assignment = assignment_service::create_assignment(
            &db,
            &owner,
            NewAssignment {
                course_id,
                title: title.to_string(),
                description: "Write it up".to_string(),
                due_date: in_days(7),
                max_marks: 10,
            },
        )
        .await
        .unwrap();
        if publish {
            lecture_service::toggle_publish(&db, &owner, lecture.lecture_id)
                .await
                .unwrap();
            document_service::toggle_publish(&db, &owner, document.document_id)
                .await
                .unwrap();
            assignment_service::toggle_publish(&db, &owner, assignment.assignment_id)
                .await
                .unwrap();
        } else {
            drafts = Some((lecture.lecture_id, document.document_id, assignment.assignment_id));
        }
    }
    let (lecture_id, document_id, assignment_id) = drafts.unwrap();

    let student = actor(&class.student);
    let lectures = lecture_service::list_lectures(&db, &student, course_id).await.unwrap();
    assert_eq!(lectures.len(), 1);
    assert!(lectures.iter().all(|l| l.is_published));
    let documents = document_service::list_documents(&db, &student, course_id).await.unwrap();
    assert_eq!(documents.len(), 1);
    let assignments = assignment_service::list_assignments(&db, &student, course_id)
        .await
        .unwrap();
    assert_eq!(assignments.len(), 1);

    let err = lecture_service::get_lecture(&db, &student, lecture_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
    let err = document_service::get_document(&db, &student, document_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
    let err = assignment_service::get_assignment(&db, &student, assignment_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

    for staff in [owner, actor(&helper)] {
        let lectures = lecture_service::list_lectures(&db, &staff, course_id).await.unwrap();
        assert_eq!(lectures.len(), 2);
        let documents = document_service::list_documents(&db, &staff, course_id).await.unwrap();
        assert_eq!(documents.len(), 2);
        let assignments = assignment_service::list_assignments(&db, &staff, course_id)
            .await
            .unwrap();
        assert_eq!(assignments.len(), 2);
        let draft = lecture_service::get_lecture(&db, &staff, lecture_id).await.unwrap();
        assert!(!draft.is_published);
    }
}
