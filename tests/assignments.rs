mod common;

use course_service::entities::assignment;
use course_service::entities::sea_orm_active_enums::RoleEnum;
use course_service::error::AppError;
use course_service::repositories::{AssignmentRepository, AssignmentUpdate};
use course_service::services::assignment_service::{self, NewAssignment};
use sea_orm::DatabaseConnection;
use test_log::test;

use crate::common::{Classroom, actor, classroom, create_user, in_days, setup_db};

async fn published_assignment(
    db: &DatabaseConnection,
    class: &Classroom,
    max_marks: i32,
) -> assignment::Model {
    let owner = actor(&class.educator);
    let assignment = assignment_service::create_assignment(
        db,
        &owner,
        NewAssignment {
            course_id: class.course.course_id,
            title: "Borrow checker kata".to_string(),
            description: "Fix the lifetimes".to_string(),
            due_date: in_days(7),
            max_marks,
        },
    )
    .await
    .unwrap();
    assignment_service::toggle_publish(db, &owner, assignment.assignment_id)
        .await
        .unwrap()
}

fn files() -> Vec<String> {
    vec!["https://files.example.com/solution.rs".to_string()]
}

#[test(tokio::test)]
async fn test_grade_must_be_within_max_marks() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let assignment = published_assignment(&db, &class, 100).await;
    assignment_service::submit(&db, &actor(&class.student), assignment.assignment_id, files())
        .await
        .unwrap();

    let educator = actor(&class.educator);
    for marks in [-1, 101] {
        let err = assignment_service::grade(
            &db,
            &educator,
            assignment.assignment_id,
            class.student.user_id,
            marks,
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "marks {marks}: {err:?}");
    }

    for marks in [0, 100] {
        let graded = assignment_service::grade(
            &db,
            &educator,
            assignment.assignment_id,
            class.student.user_id,
            marks,
            Some("ok".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(graded.marks, Some(marks));
        assert_eq!(graded.graded_by, Some(class.educator.user_id));
    }
}

#[test(tokio::test)]
async fn test_deadline_blocks_submission_but_not_grading() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let assignment = published_assignment(&db, &class, 50).await;
    let student = actor(&class.student);

    assignment_service::submit(&db, &student, assignment.assignment_id, files())
        .await
        .unwrap();

    AssignmentRepository::new(&db)
        .update(
            assignment.clone(),
            AssignmentUpdate {
                due_date: Some(in_days(-1)),
                ..AssignmentUpdate::default()
            },
        )
        .await
        .unwrap();

    let err = assignment_service::submit(&db, &student, assignment.assignment_id, files())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let graded = assignment_service::grade(
        &db,
        &actor(&class.educator),
        assignment.assignment_id,
        class.student.user_id,
        45,
        None,
    )
    .await
    .unwrap();
    assert_eq!(graded.marks, Some(45));
}

#[test(tokio::test)]
async fn test_graded_submission_is_frozen() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let assignment = published_assignment(&db, &class, 100).await;
    let student = actor(&class.student);

    assignment_service::submit(&db, &student, assignment.assignment_id, files())
        .await
        .unwrap();
    assignment_service::grade(
        &db,
        &actor(&class.educator),
        assignment.assignment_id,
        class.student.user_id,
        50,
        None,
    )
    .await
    .unwrap();

    let err = assignment_service::submit(&db, &student, assignment.assignment_id, files())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
}

#[test(tokio::test)]
async fn test_only_enrolled_students_submit_and_need_files() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let assignment = published_assignment(&db, &class, 100).await;

    let outsider = create_user(&db, RoleEnum::Student, "outsider@school.io").await;
    let err = assignment_service::submit(&db, &actor(&outsider), assignment.assignment_id, files())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = assignment_service::submit(
        &db,
        &actor(&class.student),
        assignment.assignment_id,
        vec!["  ".to_string()],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test(tokio::test)]
async fn test_submissions_list_names_the_student() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let assignment = published_assignment(&db, &class, 100).await;
    assignment_service::submit(&db, &actor(&class.student), assignment.assignment_id, files())
        .await
        .unwrap();

    let submissions =
        assignment_service::list_submissions(&db, &actor(&class.educator), assignment.assignment_id)
            .await
            .unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0].student.as_ref().map(|s| s.user_id),
        Some(class.student.user_id)
    );
}

#[test(tokio::test)]
async fn test_max_marks_cannot_drop_below_given_grades() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let assignment = published_assignment(&db, &class, 100).await;
    let educator = actor(&class.educator);

    assignment_service::submit(&db, &actor(&class.student), assignment.assignment_id, files())
        .await
        .unwrap();
    assignment_service::grade(
        &db,
        &educator,
        assignment.assignment_id,
        class.student.user_id,
        90,
        None,
    )
    .await
    .unwrap();

    let err = assignment_service::update_assignment(
        &db,
        &educator,
        assignment.assignment_id,
        AssignmentUpdate {
            max_marks: Some(50),
            ..AssignmentUpdate::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let stored = AssignmentRepository::new(&db)
        .find_by_id(assignment.assignment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.max_marks, 100);

    let updated = assignment_service::update_assignment(
        &db,
        &educator,
        assignment.assignment_id,
        AssignmentUpdate {
            max_marks: Some(90),
            ..AssignmentUpdate::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.max_marks, 90);
}
