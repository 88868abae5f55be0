use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::course_enrollment;

pub struct EnrollmentRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> EnrollmentRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find(
        &self,
        course_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<course_enrollment::Model>, DbErr> {
        course_enrollment::Entity::find_by_id((course_id, student_id))
            .one(self.conn)
            .await
    }

    pub async fn create(
        &self,
        course_id: Uuid,
        student_id: Uuid,
    ) -> Result<course_enrollment::Model, DbErr> {
        let enrollment = course_enrollment::ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            progress: Set(0),
            enrolled_at: Set(Utc::now().naive_utc()),
        };
        enrollment.insert(self.conn).await
    }

    pub async fn find_by_course(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<course_enrollment::Model>, DbErr> {
        course_enrollment::Entity::find()
            .filter(course_enrollment::Column::CourseId.eq(course_id))
            .order_by_asc(course_enrollment::Column::EnrolledAt)
            .all(self.conn)
            .await
    }

    pub async fn find_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<course_enrollment::Model>, DbErr> {
        course_enrollment::Entity::find()
            .filter(course_enrollment::Column::StudentId.eq(student_id))
            .order_by_desc(course_enrollment::Column::EnrolledAt)
            .all(self.conn)
            .await
    }

    pub async fn set_progress(
        &self,
        course_id: Uuid,
        student_id: Uuid,
        progress: i32,
    ) -> Result<(), DbErr> {
        course_enrollment::Entity::update_many()
            .col_expr(course_enrollment::Column::Progress, Expr::value(progress))
            .filter(course_enrollment::Column::CourseId.eq(course_id))
            .filter(course_enrollment::Column::StudentId.eq(student_id))
            .exec(self.conn)
            .await?;
        Ok(())
    }
}
