use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::DifficultyEnum;
use crate::entities::{course, course_enrollment};
use crate::repositories::{CourseFilter, CourseUpdate};
use crate::routes::auth::dto::UserResponse;
use crate::services::course_service::{CourseDetail, NewCourse};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[schema(example = "Practical Rust")]
    pub title: String,
    pub description: String,
    #[schema(example = "programming")]
    pub category: String,
    pub difficulty: DifficultyEnum,
    pub thumbnail: Option<String>,
}

impl From<CreateCourseRequest> for NewCourse {
    fn from(request: CreateCourseRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            category: request.category,
            difficulty: request.difficulty,
            thumbnail: request.thumbnail,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<DifficultyEnum>,
    pub thumbnail: Option<String>,
    /// Revision the client last read; a mismatch is rejected.
    pub expected_revision: Option<i32>,
}

impl UpdateCourseRequest {
    pub fn into_parts(self) -> (CourseUpdate, Option<i32>) {
        (
            CourseUpdate {
                title: self.title,
                description: self.description,
                category: self.category,
                difficulty: self.difficulty,
                thumbnail: self.thumbnail,
            },
            self.expected_revision,
        )
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseQuery {
    pub category: Option<String>,
    pub difficulty: Option<DifficultyEnum>,
    pub search: Option<String>,
}

impl From<CourseQuery> for CourseFilter {
    fn from(query: CourseQuery) -> Self {
        Self {
            category: query.category,
            difficulty: query.difficulty,
            search: query.search,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub course_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: DifficultyEnum,
    pub thumbnail: Option<String>,
    pub educator_id: Uuid,
    pub is_published: bool,
    pub revision: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<course::Model> for CourseResponse {
    fn from(course: course::Model) -> Self {
        Self {
            course_id: course.course_id,
            title: course.title,
            description: course.description,
            category: course.category,
            difficulty: course.difficulty,
            thumbnail: course.thumbnail,
            educator_id: course.educator_id,
            is_published: course.is_published,
            revision: course.revision,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    pub course: CourseResponse,
    pub educator: Option<UserResponse>,
    pub enrollment_count: usize,
    pub is_owner: bool,
    pub is_enrolled: bool,
    pub is_assigned_ta: bool,
}

impl From<CourseDetail> for CourseDetailResponse {
    fn from(detail: CourseDetail) -> Self {
        Self {
            course: detail.course.into(),
            educator: detail.educator.map(UserResponse::from),
            enrollment_count: detail.enrollment_count,
            is_owner: detail.relationship.owner,
            is_enrolled: detail.relationship.enrolled,
            is_assigned_ta: detail.relationship.assigned_ta,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
    pub total: usize,
}

impl From<Vec<course::Model>> for CourseListResponse {
    fn from(courses: Vec<course::Model>) -> Self {
        Self {
            total: courses.len(),
            courses: courses.into_iter().map(CourseResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    pub course_id: Uuid,
    pub student_id: Uuid,
    pub progress: i32,
    pub enrolled_at: NaiveDateTime,
}

impl From<course_enrollment::Model> for EnrollmentResponse {
    fn from(enrollment: course_enrollment::Model) -> Self {
        Self {
            course_id: enrollment.course_id,
            student_id: enrollment.student_id,
            progress: enrollment.progress,
            enrolled_at: enrollment.enrolled_at,
        }
    }
}
