//! Submission lifecycle: `Unsubmitted -> Submitted -> Graded`.

use chrono::NaiveDateTime;

use crate::entities::{assignment, assignment_submission};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Unsubmitted,
    Submitted,
    Graded,
}

impl SubmissionState {
    pub fn of(submission: Option<&assignment_submission::Model>) -> Self {
        match submission {
            None => Self::Unsubmitted,
            Some(s) if s.marks.is_some() => Self::Graded,
            Some(_) => Self::Submitted,
        }
    }
}

/// Checks that a student may (re)submit right now. Grading freezes a
/// submission.
pub fn check_submit(
    assignment: &assignment::Model,
    state: SubmissionState,
    now: NaiveDateTime,
) -> AppResult<()> {
    if !assignment.is_published {
        return Err(AppError::Validation(
            "Assignment is not published".to_string(),
        ));
    }
    if now > assignment.due_date {
        return Err(AppError::Validation(
            "Submission deadline has passed".to_string(),
        ));
    }
    match state {
        SubmissionState::Unsubmitted | SubmissionState::Submitted => Ok(()),
        SubmissionState::Graded => Err(AppError::Conflict(
            "Submission has already been graded".to_string(),
        )),
    }
}

/// Checks a grade against the assignment. Re-grading is allowed and the
/// deadline does not apply.
pub fn check_grade(assignment: &assignment::Model, state: SubmissionState, marks: i32) -> AppResult<()> {
    if state == SubmissionState::Unsubmitted {
        return Err(AppError::not_found("Submission"));
    }
    validate_marks(marks, assignment.max_marks)
}

pub fn validate_marks(marks: i32, max_marks: i32) -> AppResult<()> {
    if !(0..=max_marks).contains(&marks) {
        return Err(AppError::Validation(format!(
            "Marks must be between 0 and {max_marks}"
        )));
    }
    Ok(())
}

pub fn validate_max_marks(max_marks: i32) -> AppResult<()> {
    if max_marks <= 0 {
        return Err(AppError::Validation(
            "Max marks must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// A new max_marks must still cover every grade already given.
pub fn check_max_marks_change(
    max_marks: i32,
    submissions: &[assignment_submission::Model],
) -> AppResult<()> {
    validate_max_marks(max_marks)?;
    match submissions.iter().filter_map(|s| s.marks).max() {
        Some(highest) if highest > max_marks => Err(AppError::Validation(format!(
            "Max marks cannot be lower than an existing grade of {highest}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn assignment(published: bool, due_in: Duration) -> assignment::Model {
        let now = Utc::now().naive_utc();
        assignment::Model {
            assignment_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            title: "Borrow checker".to_string(),
            description: "Explain lifetimes".to_string(),
            due_date: now + due_in,
            max_marks: 50,
            is_published: published,
            created_at: now,
            updated_at: now,
        }
    }

    fn submission(marks: Option<i32>) -> assignment_submission::Model {
        assignment_submission::Model {
            assignment_id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            files: serde_json::json!(["https://files.example.com/a.pdf"]),
            submitted_at: Utc::now().naive_utc(),
            marks,
            feedback: None,
            graded_by: None,
            graded_at: None,
        }
    }

    #[test]
    fn test_state_of_submission() {
        assert_eq!(SubmissionState::of(None), SubmissionState::Unsubmitted);
        assert_eq!(
            SubmissionState::of(Some(&submission(None))),
            SubmissionState::Submitted
        );
        assert_eq!(
            SubmissionState::of(Some(&submission(Some(10)))),
            SubmissionState::Graded
        );
    }

    #[test]
    fn test_submit_before_deadline() {
        let a = assignment(true, Duration::days(1));
        let now = Utc::now().naive_utc();
        assert!(check_submit(&a, SubmissionState::Unsubmitted, now).is_ok());
        assert!(check_submit(&a, SubmissionState::Submitted, now).is_ok());
    }

    #[test]
    fn test_submit_after_deadline_is_rejected() {
        let a = assignment(true, Duration::days(-1));
        let err = check_submit(&a, SubmissionState::Unsubmitted, Utc::now().naive_utc())
            .unwrap_err();
        assert!(err.to_string().contains("deadline"));
    }

    #[test]
    fn test_submit_unpublished_is_rejected() {
        let a = assignment(false, Duration::days(1));
        assert!(check_submit(&a, SubmissionState::Unsubmitted, Utc::now().naive_utc()).is_err());
    }

    #[test]
    fn test_graded_submission_is_frozen() {
        let a = assignment(true, Duration::days(1));
        assert!(matches!(
            check_submit(&a, SubmissionState::Graded, Utc::now().naive_utc()),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_grade_bounds() {
        let a = assignment(true, Duration::days(-1));
        assert!(check_grade(&a, SubmissionState::Submitted, 0).is_ok());
        assert!(check_grade(&a, SubmissionState::Submitted, 50).is_ok());
        assert!(check_grade(&a, SubmissionState::Graded, 25).is_ok());
        assert!(check_grade(&a, SubmissionState::Submitted, 51).is_err());
        assert!(check_grade(&a, SubmissionState::Submitted, -1).is_err());
        assert!(matches!(
            check_grade(&a, SubmissionState::Unsubmitted, 10),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_max_marks_cannot_drop_below_existing_grades() {
        let graded = [submission(None), submission(Some(40))];
        assert!(check_max_marks_change(40, &graded).is_ok());
        assert!(check_max_marks_change(100, &graded).is_ok());
        assert!(matches!(
            check_max_marks_change(39, &graded),
            Err(AppError::Validation(_))
        ));
        assert!(check_max_marks_change(0, &[]).is_err());
    }
}
