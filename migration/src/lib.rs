pub use sea_orm_migration::prelude::*;

mod m20260110_000001_create_users_and_courses;
mod m20260110_000002_create_course_content;
mod m20260110_000003_create_progress_and_mentorship;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_create_users_and_courses::Migration),
            Box::new(m20260110_000002_create_course_content::Migration),
            Box::new(m20260110_000003_create_progress_and_mentorship::Migration),
        ]
    }
}
