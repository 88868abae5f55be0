pub mod assignment_repository;
pub mod course_repository;
pub mod course_ta_repository;
pub mod document_repository;
pub mod enrollment_repository;
pub mod industry_rating_repository;
pub mod lecture_repository;
pub mod mentorship_repository;
pub mod progress_repository;
pub mod user_repository;

pub use assignment_repository::{AssignmentRepository, AssignmentUpdate};
pub use course_repository::{CourseFilter, CourseRepository, CourseUpdate};
pub use course_ta_repository::CourseTaRepository;
pub use document_repository::{DocumentRepository, DocumentUpdate};
pub use enrollment_repository::EnrollmentRepository;
pub use industry_rating_repository::IndustryRatingRepository;
pub use lecture_repository::{LectureRepository, LectureUpdate};
pub use mentorship_repository::{MentorshipRepository, NewSession, SessionUpdate};
pub use progress_repository::ProgressRepository;
pub use user_repository::{UserRepository, UserUpdate};
