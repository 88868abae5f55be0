#![allow(dead_code)]

use chrono::{Duration, NaiveDateTime, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema};

use course_service::domain::Actor;
use course_service::entities::sea_orm_active_enums::{DifficultyEnum, RoleEnum};
use course_service::entities::{
    assignment, assignment_submission, course, course_enrollment, course_ta, course_ta_student,
    document, document_view, industry_rating, lecture, lecture_watch, mentorship_session,
    student_progress, user,
};
use course_service::repositories::UserRepository;
use course_service::services::course_service::{self as courses, NewCourse};

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(entity)))
        .await?;
    Ok(())
}

pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, user::Entity).await?;
    create_table(db, course::Entity).await?;
    create_table(db, course_enrollment::Entity).await?;
    create_table(db, course_ta::Entity).await?;
    create_table(db, course_ta_student::Entity).await?;
    create_table(db, lecture::Entity).await?;
    create_table(db, document::Entity).await?;
    create_table(db, assignment::Entity).await?;
    create_table(db, assignment_submission::Entity).await?;
    create_table(db, student_progress::Entity).await?;
    create_table(db, lecture_watch::Entity).await?;
    create_table(db, document_view::Entity).await?;
    create_table(db, mentorship_session::Entity).await?;
    create_table(db, industry_rating::Entity).await?;
    Ok(())
}

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(&db).await.unwrap();
    db
}

/// Inserts a user with a dummy hash; bcrypt is too slow for fixtures.
pub async fn create_user(db: &DatabaseConnection, role: RoleEnum, email: &str) -> user::Model {
    UserRepository::new(db)
        .create(
            email.split('@').next().unwrap().to_string(),
            email.to_string(),
            "not-a-real-hash".to_string(),
            role,
        )
        .await
        .unwrap()
}

pub fn actor(user: &user::Model) -> Actor {
    Actor::new(user.user_id, user.role)
}

pub async fn draft_course(db: &DatabaseConnection, educator: &user::Model) -> course::Model {
    courses::create_course(
        db,
        &actor(educator),
        NewCourse {
            title: "Practical Rust".to_string(),
            description: "Ownership, traits and async".to_string(),
            category: "programming".to_string(),
            difficulty: DifficultyEnum::Intermediate,
            thumbnail: None,
        },
    )
    .await
    .unwrap()
}

pub async fn published_course(db: &DatabaseConnection, educator: &user::Model) -> course::Model {
    let course = draft_course(db, educator).await;
    courses::toggle_publish(db, &actor(educator), course.course_id)
        .await
        .unwrap()
}

/// An educator with a published course and one enrolled student.
pub struct Classroom {
    pub educator: user::Model,
    pub student: user::Model,
    pub course: course::Model,
}

pub async fn classroom(db: &DatabaseConnection) -> Classroom {
    let educator = create_user(db, RoleEnum::Educator, "teacher@school.io").await;
    let student = create_user(db, RoleEnum::Student, "learner@school.io").await;
    let course = published_course(db, &educator).await;
    courses::enroll(db, &actor(&student), course.course_id)
        .await
        .unwrap();

    Classroom {
        educator,
        student,
        course,
    }
}

pub fn in_days(days: i64) -> NaiveDateTime {
    Utc::now().naive_utc() + Duration::days(days)
}
