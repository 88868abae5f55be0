use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{assignment, assignment_submission};

pub struct AssignmentRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

#[derive(Debug, Default, Clone)]
pub struct AssignmentUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDateTime>,
    pub max_marks: Option<i32>,
}

impl<'a, C: ConnectionTrait> AssignmentRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, assignment_id: Uuid) -> Result<Option<assignment::Model>, DbErr> {
        assignment::Entity::find_by_id(assignment_id)
            .one(self.conn)
            .await
    }

    pub async fn find_by_course(
        &self,
        course_id: Uuid,
        published_only: bool,
    ) -> Result<Vec<assignment::Model>, DbErr> {
        let mut query =
            assignment::Entity::find().filter(assignment::Column::CourseId.eq(course_id));
        if published_only {
            query = query.filter(assignment::Column::IsPublished.eq(true));
        }
        query
            .order_by_asc(assignment::Column::DueDate)
            .all(self.conn)
            .await
    }

    pub async fn create(
        &self,
        course_id: Uuid,
        title: String,
        description: String,
        due_date: NaiveDateTime,
        max_marks: i32,
    ) -> Result<assignment::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let assignment = assignment::ActiveModel {
            assignment_id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            title: Set(title),
            description: Set(description),
            due_date: Set(due_date),
            max_marks: Set(max_marks),
            is_published: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        assignment.insert(self.conn).await
    }

    pub async fn update(
        &self,
        assignment: assignment::Model,
        updates: AssignmentUpdate,
    ) -> Result<assignment::Model, DbErr> {
        let mut active_model: assignment::ActiveModel = assignment.into();

        if let Some(title) = updates.title {
            active_model.title = Set(title);
        }
        if let Some(description) = updates.description {
            active_model.description = Set(description);
        }
        if let Some(due_date) = updates.due_date {
            active_model.due_date = Set(due_date);
        }
        if let Some(max_marks) = updates.max_marks {
            active_model.max_marks = Set(max_marks);
        }

        active_model.updated_at = Set(Utc::now().naive_utc());
        active_model.update(self.conn).await
    }

    pub async fn set_published(
        &self,
        assignment: assignment::Model,
        is_published: bool,
    ) -> Result<assignment::Model, DbErr> {
        let mut active_model: assignment::ActiveModel = assignment.into();
        active_model.is_published = Set(is_published);
        active_model.updated_at = Set(Utc::now().naive_utc());
        active_model.update(self.conn).await
    }

    pub async fn delete(&self, assignment_id: Uuid) -> Result<(), DbErr> {
        assignment_submission::Entity::delete_many()
            .filter(assignment_submission::Column::AssignmentId.eq(assignment_id))
            .exec(self.conn)
            .await?;
        assignment::Entity::delete_by_id(assignment_id)
            .exec(self.conn)
            .await?;
        Ok(())
    }

    pub async fn find_submission(
        &self,
        assignment_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<assignment_submission::Model>, DbErr> {
        assignment_submission::Entity::find_by_id((assignment_id, student_id))
            .one(self.conn)
            .await
    }

    pub async fn find_submissions(
        &self,
        assignment_id: Uuid,
    ) -> Result<Vec<assignment_submission::Model>, DbErr> {
        assignment_submission::Entity::find()
            .filter(assignment_submission::Column::AssignmentId.eq(assignment_id))
            .order_by_asc(assignment_submission::Column::SubmittedAt)
            .all(self.conn)
            .await
    }

    /// Creates the submission or overwrites files and timestamp of an
    /// existing one.
    pub async fn upsert_submission(
        &self,
        existing: Option<assignment_submission::Model>,
        assignment_id: Uuid,
        student_id: Uuid,
        files: Vec<String>,
    ) -> Result<assignment_submission::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let files = serde_json::Value::from(files);

        match existing {
            Some(submission) => {
                let mut active_model: assignment_submission::ActiveModel = submission.into();
                active_model.files = Set(files);
                active_model.submitted_at = Set(now);
                active_model.update(self.conn).await
            }
            None => {
                let submission = assignment_submission::ActiveModel {
                    assignment_id: Set(assignment_id),
                    student_id: Set(student_id),
                    files: Set(files),
                    submitted_at: Set(now),
                    marks: Set(None),
                    feedback: Set(None),
                    graded_by: Set(None),
                    graded_at: Set(None),
                };
                submission.insert(self.conn).await
            }
        }
    }

    pub async fn grade_submission(
        &self,
        submission: assignment_submission::Model,
        marks: i32,
        feedback: Option<String>,
        graded_by: Uuid,
    ) -> Result<assignment_submission::Model, DbErr> {
        let mut active_model: assignment_submission::ActiveModel = submission.into();
        active_model.marks = Set(Some(marks));
        active_model.feedback = Set(feedback);
        active_model.graded_by = Set(Some(graded_by));
        active_model.graded_at = Set(Some(Utc::now().naive_utc()));
        active_model.update(self.conn).await
    }
}
