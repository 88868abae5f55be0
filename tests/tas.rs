mod common;

use course_service::entities::sea_orm_active_enums::RoleEnum;
use course_service::entities::user;
use course_service::error::AppError;
use course_service::repositories::UserRepository;
use course_service::services::ta_service::{self, TaAssignmentRequest};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use test_log::test;

use crate::common::{actor, classroom, create_user, setup_db};

fn request(course_id: uuid::Uuid, email: &str) -> TaAssignmentRequest {
    TaAssignmentRequest {
        course_id,
        email: email.to_string(),
        name: None,
        student_ids: Vec::new(),
    }
}

#[test(tokio::test)]
async fn test_unknown_email_creates_exactly_one_ta_account() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let educator = actor(&class.educator);

    let mut req = request(class.course.course_id, "New.Helper@School.io");
    req.student_ids = vec![class.student.user_id];
    let assignment = ta_service::assign_ta(&db, &educator, req).await.unwrap();
    assert!(assignment.account_created);
    assert_eq!(assignment.ta.role, RoleEnum::Ta);
    assert_eq!(assignment.ta.email, "new.helper@school.io");
    assert_eq!(assignment.assigned_students, vec![class.student.user_id]);

    let again = ta_service::assign_ta(
        &db,
        &educator,
        request(class.course.course_id, "new.helper@school.io"),
    )
    .await
    .unwrap();
    assert!(!again.account_created);
    assert_eq!(again.ta.user_id, assignment.ta.user_id);
    assert!(again.assigned_students.is_empty());

    let accounts = user::Entity::find()
        .filter(user::Column::Email.eq("new.helper@school.io"))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(accounts, 1);
}

#[test(tokio::test)]
async fn test_educators_cannot_become_tas() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let colleague = create_user(&db, RoleEnum::Educator, "colleague@school.io").await;

    let err = ta_service::assign_ta(
        &db,
        &actor(&class.educator),
        request(class.course.course_id, &colleague.email),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let unchanged = UserRepository::new(&db)
        .find_by_id(colleague.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.role, RoleEnum::Educator);
}

#[test(tokio::test)]
async fn test_student_is_promoted_when_assigned() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let senior = create_user(&db, RoleEnum::Student, "senior@school.io").await;

    let assignment = ta_service::assign_ta(
        &db,
        &actor(&class.educator),
        request(class.course.course_id, &senior.email),
    )
    .await
    .unwrap();
    assert!(!assignment.account_created);
    assert_eq!(assignment.ta.user_id, senior.user_id);
    assert_eq!(assignment.ta.role, RoleEnum::Ta);
}

#[test(tokio::test)]
async fn test_assigned_students_must_be_enrolled() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let ta = create_user(&db, RoleEnum::Ta, "helper@school.io").await;
    let stranger = create_user(&db, RoleEnum::Student, "stranger@school.io").await;

    let mut req = request(class.course.course_id, &ta.email);
    req.student_ids = vec![stranger.user_id];
    let err = ta_service::assign_ta(&db, &actor(&class.educator), req)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test(tokio::test)]
async fn test_available_students_shrink_as_tas_take_them() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let educator = actor(&class.educator);
    let ta = create_user(&db, RoleEnum::Ta, "helper@school.io").await;

    let available = ta_service::available_students(&db, &educator, class.course.course_id)
        .await
        .unwrap();
    assert_eq!(available.len(), 1);

    ta_service::assign_ta(&db, &educator, request(class.course.course_id, &ta.email))
        .await
        .unwrap();
    ta_service::update_ta_students(
        &db,
        &educator,
        class.course.course_id,
        ta.user_id,
        vec![class.student.user_id],
    )
    .await
    .unwrap();

    let available = ta_service::available_students(&db, &educator, class.course.course_id)
        .await
        .unwrap();
    assert!(available.is_empty());

    let overview = ta_service::list_tas(&db, &educator).await.unwrap();
    assert_eq!(overview.len(), 1);
    assert_eq!(overview[0].courses[0].assigned_students, vec![class.student.user_id]);

    ta_service::remove_ta(&db, &educator, class.course.course_id, ta.user_id)
        .await
        .unwrap();
    assert!(ta_service::list_tas(&db, &educator).await.unwrap().is_empty());
}

#[test(tokio::test)]
async fn test_students_cannot_manage_tas() {
    let db = setup_db().await;
    let class = classroom(&db).await;

    let err = ta_service::assign_ta(
        &db,
        &actor(&class.student),
        request(class.course.course_id, "someone@school.io"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[test(tokio::test)]
async fn test_ta_cannot_be_their_own_student() {
    let db = setup_db().await;
    let class = classroom(&db).await;
    let educator = actor(&class.educator);

    let mut req = request(class.course.course_id, &class.student.email);
    req.student_ids = vec![class.student.user_id];
    let err = ta_service::assign_ta(&db, &educator, req).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let unchanged = UserRepository::new(&db)
        .find_by_id(class.student.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.role, RoleEnum::Student);

    let helper = create_user(&db, RoleEnum::Ta, "helper@school.io").await;
    ta_service::assign_ta(&db, &educator, request(class.course.course_id, &helper.email))
        .await
        .unwrap();
    let err = ta_service::update_ta_students(
        &db,
        &educator,
        class.course.course_id,
        helper.user_id,
        vec![helper.user_id],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}
