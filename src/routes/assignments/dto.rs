use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{assignment, assignment_submission};
use crate::repositories::AssignmentUpdate;
use crate::routes::auth::dto::UserResponse;
use crate::services::assignment_service::{NewAssignment, SubmissionWithStudent};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    pub course_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDateTime,
    #[schema(example = 100)]
    pub max_marks: i32,
}

impl From<CreateAssignmentRequest> for NewAssignment {
    fn from(request: CreateAssignmentRequest) -> Self {
        Self {
            course_id: request.course_id,
            title: request.title,
            description: request.description,
            due_date: request.due_date,
            max_marks: request.max_marks,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDateTime>,
    pub max_marks: Option<i32>,
}

impl From<UpdateAssignmentRequest> for AssignmentUpdate {
    fn from(request: UpdateAssignmentRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            due_date: request.due_date,
            max_marks: request.max_marks,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssignmentRequest {
    /// URLs of the uploaded files.
    pub files: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeSubmissionRequest {
    pub marks: i32,
    pub feedback: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentResponse {
    pub assignment_id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDateTime,
    pub max_marks: i32,
    pub is_published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<assignment::Model> for AssignmentResponse {
    fn from(assignment: assignment::Model) -> Self {
        Self {
            assignment_id: assignment.assignment_id,
            course_id: assignment.course_id,
            title: assignment.title,
            description: assignment.description,
            due_date: assignment.due_date,
            max_marks: assignment.max_marks,
            is_published: assignment.is_published,
            created_at: assignment.created_at,
            updated_at: assignment.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionResponse {
    pub assignment_id: Uuid,
    pub student_id: Uuid,
    pub files: Vec<String>,
    pub submitted_at: NaiveDateTime,
    pub marks: Option<i32>,
    pub feedback: Option<String>,
    pub graded_by: Option<Uuid>,
    pub graded_at: Option<NaiveDateTime>,
}

impl From<assignment_submission::Model> for SubmissionResponse {
    fn from(submission: assignment_submission::Model) -> Self {
        let files = serde_json::from_value(submission.files).unwrap_or_default();
        Self {
            assignment_id: submission.assignment_id,
            student_id: submission.student_id,
            files,
            submitted_at: submission.submitted_at,
            marks: submission.marks,
            feedback: submission.feedback,
            graded_by: submission.graded_by,
            graded_at: submission.graded_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentDetailResponse {
    pub assignment: AssignmentResponse,
    /// The caller's own submission, if any.
    pub submission: Option<SubmissionResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentSubmissionResponse {
    pub submission: SubmissionResponse,
    pub student: Option<UserResponse>,
}

impl From<SubmissionWithStudent> for StudentSubmissionResponse {
    fn from(item: SubmissionWithStudent) -> Self {
        Self {
            submission: item.submission.into(),
            student: item.student.map(UserResponse::from),
        }
    }
}
