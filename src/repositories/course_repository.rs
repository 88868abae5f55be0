use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::DifficultyEnum;
use crate::entities::{
    assignment, assignment_submission, course, course_enrollment, course_ta, course_ta_student,
    document, document_view, industry_rating, lecture, lecture_watch, mentorship_session,
    student_progress,
};

pub struct CourseRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

#[derive(Debug, Default, Clone)]
pub struct CourseFilter {
    pub category: Option<String>,
    pub difficulty: Option<DifficultyEnum>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<DifficultyEnum>,
    pub thumbnail: Option<String>,
}

impl<'a, C: ConnectionTrait> CourseRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, course_id: Uuid) -> Result<Option<course::Model>, DbErr> {
        course::Entity::find_by_id(course_id).one(self.conn).await
    }

    pub async fn find_by_ids(&self, course_ids: Vec<Uuid>) -> Result<Vec<course::Model>, DbErr> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }
        course::Entity::find()
            .filter(course::Column::CourseId.is_in(course_ids))
            .order_by_desc(course::Column::CreatedAt)
            .all(self.conn)
            .await
    }

    /// Published courses matching the filter, plus every course owned by
    /// `owner_id` when given.
    pub async fn find_visible(
        &self,
        filter: CourseFilter,
        owner_id: Option<Uuid>,
    ) -> Result<Vec<course::Model>, DbErr> {
        let mut visibility = Condition::any().add(course::Column::IsPublished.eq(true));
        if let Some(owner_id) = owner_id {
            visibility = visibility.add(course::Column::EducatorId.eq(owner_id));
        }

        let mut query = course::Entity::find().filter(visibility);

        if let Some(category) = filter.category {
            query = query.filter(course::Column::Category.eq(category));
        }
        if let Some(difficulty) = filter.difficulty {
            query = query.filter(course::Column::Difficulty.eq(difficulty));
        }
        if let Some(search) = filter.search.filter(|s| !s.trim().is_empty()) {
            let search = search.trim();
            query = query.filter(
                Condition::any()
                    .add(course::Column::Title.contains(search))
                    .add(course::Column::Description.contains(search)),
            );
        }

        query
            .order_by_desc(course::Column::CreatedAt)
            .all(self.conn)
            .await
    }

    pub async fn find_by_educator(&self, educator_id: Uuid) -> Result<Vec<course::Model>, DbErr> {
        course::Entity::find()
            .filter(course::Column::EducatorId.eq(educator_id))
            .order_by_desc(course::Column::CreatedAt)
            .all(self.conn)
            .await
    }

    pub async fn create(
        &self,
        educator_id: Uuid,
        title: String,
        description: String,
        category: String,
        difficulty: DifficultyEnum,
        thumbnail: Option<String>,
    ) -> Result<course::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let course = course::ActiveModel {
            course_id: Set(Uuid::new_v4()),
            title: Set(title),
            description: Set(description),
            category: Set(category),
            difficulty: Set(difficulty),
            thumbnail: Set(thumbnail),
            educator_id: Set(educator_id),
            is_published: Set(false),
            revision: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        course.insert(self.conn).await
    }

    /// Writes the update only if the stored revision still equals the one in
    /// `course`. Returns `None` when another writer got there first.
    pub async fn update(
        &self,
        course: course::Model,
        updates: CourseUpdate,
    ) -> Result<Option<course::Model>, DbErr> {
        let expected_revision = course.revision;
        let mut active_model: course::ActiveModel = course.into();

        if let Some(title) = updates.title {
            active_model.title = Set(title);
        }
        if let Some(description) = updates.description {
            active_model.description = Set(description);
        }
        if let Some(category) = updates.category {
            active_model.category = Set(category);
        }
        if let Some(difficulty) = updates.difficulty {
            active_model.difficulty = Set(difficulty);
        }
        if let Some(thumbnail) = updates.thumbnail {
            active_model.thumbnail = Set(Some(thumbnail));
        }

        self.write_revision(active_model, expected_revision).await
    }

    pub async fn set_published(
        &self,
        course: course::Model,
        is_published: bool,
    ) -> Result<Option<course::Model>, DbErr> {
        let expected_revision = course.revision;
        let mut active_model: course::ActiveModel = course.into();
        active_model.is_published = Set(is_published);
        self.write_revision(active_model, expected_revision).await
    }

    async fn write_revision(
        &self,
        mut active_model: course::ActiveModel,
        expected_revision: i32,
    ) -> Result<Option<course::Model>, DbErr> {
        active_model.revision = Set(expected_revision + 1);
        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = course::Entity::update(active_model)
            .filter(course::Column::Revision.eq(expected_revision))
            .exec(self.conn)
            .await;

        match result {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Removes the course together with every row that hangs off it.
    pub async fn delete_cascade(&self, course_id: Uuid) -> Result<(), DbErr> {
        let assignment_ids: Vec<Uuid> = assignment::Entity::find()
            .filter(assignment::Column::CourseId.eq(course_id))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|a| a.assignment_id)
            .collect();

        if !assignment_ids.is_empty() {
            assignment_submission::Entity::delete_many()
                .filter(assignment_submission::Column::AssignmentId.is_in(assignment_ids))
                .exec(self.conn)
                .await?;
        }

        assignment::Entity::delete_many()
            .filter(assignment::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;
        lecture_watch::Entity::delete_many()
            .filter(lecture_watch::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;
        document_view::Entity::delete_many()
            .filter(document_view::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;
        lecture::Entity::delete_many()
            .filter(lecture::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;
        document::Entity::delete_many()
            .filter(document::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;
        student_progress::Entity::delete_many()
            .filter(student_progress::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;
        mentorship_session::Entity::delete_many()
            .filter(mentorship_session::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;
        industry_rating::Entity::delete_many()
            .filter(industry_rating::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;
        course_ta_student::Entity::delete_many()
            .filter(course_ta_student::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;
        course_ta::Entity::delete_many()
            .filter(course_ta::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;
        course_enrollment::Entity::delete_many()
            .filter(course_enrollment::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;
        course::Entity::delete_by_id(course_id).exec(self.conn).await?;

        Ok(())
    }
}
