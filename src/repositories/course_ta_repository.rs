use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{course_ta, course_ta_student};

pub struct CourseTaRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CourseTaRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find(&self, course_id: Uuid, ta_id: Uuid) -> Result<Option<course_ta::Model>, DbErr> {
        course_ta::Entity::find_by_id((course_id, ta_id))
            .one(self.conn)
            .await
    }

    pub async fn find_by_course(&self, course_id: Uuid) -> Result<Vec<course_ta::Model>, DbErr> {
        course_ta::Entity::find()
            .filter(course_ta::Column::CourseId.eq(course_id))
            .order_by_asc(course_ta::Column::AssignedAt)
            .all(self.conn)
            .await
    }

    pub async fn find_by_courses(&self, course_ids: Vec<Uuid>) -> Result<Vec<course_ta::Model>, DbErr> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }
        course_ta::Entity::find()
            .filter(course_ta::Column::CourseId.is_in(course_ids))
            .order_by_asc(course_ta::Column::AssignedAt)
            .all(self.conn)
            .await
    }

    pub async fn find_by_ta(&self, ta_id: Uuid) -> Result<Vec<course_ta::Model>, DbErr> {
        course_ta::Entity::find()
            .filter(course_ta::Column::TaId.eq(ta_id))
            .all(self.conn)
            .await
    }

    /// Inserts the TA row if missing and returns it.
    pub async fn ensure(&self, course_id: Uuid, ta_id: Uuid) -> Result<course_ta::Model, DbErr> {
        if let Some(existing) = self.find(course_id, ta_id).await? {
            return Ok(existing);
        }
        let row = course_ta::ActiveModel {
            course_id: Set(course_id),
            ta_id: Set(ta_id),
            assigned_at: Set(Utc::now().naive_utc()),
        };
        row.insert(self.conn).await
    }

    pub async fn remove(&self, course_id: Uuid, ta_id: Uuid) -> Result<(), DbErr> {
        course_ta_student::Entity::delete_many()
            .filter(course_ta_student::Column::CourseId.eq(course_id))
            .filter(course_ta_student::Column::TaId.eq(ta_id))
            .exec(self.conn)
            .await?;
        course_ta::Entity::delete_by_id((course_id, ta_id))
            .exec(self.conn)
            .await?;
        Ok(())
    }

    pub async fn assigned_students(
        &self,
        course_id: Uuid,
        ta_id: Uuid,
    ) -> Result<Vec<Uuid>, DbErr> {
        let rows = course_ta_student::Entity::find()
            .filter(course_ta_student::Column::CourseId.eq(course_id))
            .filter(course_ta_student::Column::TaId.eq(ta_id))
            .all(self.conn)
            .await?;
        Ok(rows.into_iter().map(|r| r.student_id).collect())
    }

    /// Replaces the assigned-student subset of a TA within a course.
    pub async fn replace_students(
        &self,
        course_id: Uuid,
        ta_id: Uuid,
        student_ids: &[Uuid],
    ) -> Result<(), DbErr> {
        course_ta_student::Entity::delete_many()
            .filter(course_ta_student::Column::CourseId.eq(course_id))
            .filter(course_ta_student::Column::TaId.eq(ta_id))
            .exec(self.conn)
            .await?;

        if student_ids.is_empty() {
            return Ok(());
        }

        let rows = student_ids.iter().map(|student_id| course_ta_student::ActiveModel {
            course_id: Set(course_id),
            ta_id: Set(ta_id),
            student_id: Set(*student_id),
        });
        course_ta_student::Entity::insert_many(rows)
            .exec(self.conn)
            .await?;
        Ok(())
    }
}
