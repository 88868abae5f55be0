pub mod assignment;
pub mod assignment_submission;
pub mod course;
pub mod course_enrollment;
pub mod course_ta;
pub mod course_ta_student;
pub mod document;
pub mod document_view;
pub mod industry_rating;
pub mod lecture;
pub mod lecture_watch;
pub mod mentorship_session;
pub mod sea_orm_active_enums;
pub mod student_progress;
pub mod user;
