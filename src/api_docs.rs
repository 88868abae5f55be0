use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::ErrorResponse;
use crate::routes::{self, MessageResponse};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course Service API",
        description = "Courses, content, assignments, progress and mentorship for educators, students, TAs and industry experts"
    ),
    paths(
        routes::health::route::health,
        routes::auth::route::register,
        routes::auth::route::login,
        routes::auth::route::get_profile,
        routes::auth::route::update_profile,
        routes::courses::route::create_course,
        routes::courses::route::list_courses,
        routes::courses::route::my_courses,
        routes::courses::route::get_course,
        routes::courses::route::update_course,
        routes::courses::route::delete_course,
        routes::courses::route::enroll,
        routes::courses::route::assign_ta,
        routes::courses::route::toggle_publish,
        routes::lectures::route::create_lecture,
        routes::lectures::route::list_lectures,
        routes::lectures::route::get_lecture,
        routes::lectures::route::update_lecture,
        routes::lectures::route::delete_lecture,
        routes::lectures::route::toggle_publish,
        routes::lectures::route::reorder_lectures,
        routes::documents::route::create_document,
        routes::documents::route::list_documents,
        routes::documents::route::get_document,
        routes::documents::route::update_document,
        routes::documents::route::delete_document,
        routes::documents::route::toggle_publish,
        routes::documents::route::reorder_documents,
        routes::assignments::route::create_assignment,
        routes::assignments::route::list_assignments,
        routes::assignments::route::get_assignment,
        routes::assignments::route::update_assignment,
        routes::assignments::route::delete_assignment,
        routes::assignments::route::submit,
        routes::assignments::route::grade,
        routes::assignments::route::toggle_publish,
        routes::assignments::route::list_submissions,
        routes::progress::route::get_course_progress,
        routes::progress::route::record_lecture_watch,
        routes::progress::route::record_document_view,
        routes::progress::route::my_progress,
        routes::progress::route::course_analytics,
        routes::mentorship::route::create_session,
        routes::mentorship::route::my_sessions,
        routes::mentorship::route::course_sessions,
        routes::mentorship::route::get_session,
        routes::mentorship::route::update_session,
        routes::mentorship::route::start_session,
        routes::mentorship::route::complete_session,
        routes::mentorship::route::cancel_session,
        routes::mentorship::route::rate_session,
        routes::mentorship::route::availability,
        routes::tas::route::list_tas,
        routes::tas::route::assign_ta,
        routes::tas::route::remove_ta,
        routes::tas::route::update_ta_students,
        routes::tas::route::available_students,
        routes::tas::route::ta_detail,
        routes::industry_ratings::route::rate_course,
        routes::industry_ratings::route::course_ratings,
    ),
    components(schemas(ErrorResponse, MessageResponse)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Registration, login and profile"),
        (name = "Courses", description = "Course catalogue and enrollment"),
        (name = "Lectures", description = "Course lectures"),
        (name = "Documents", description = "Course documents"),
        (name = "Assignments", description = "Assignments, submissions and grading"),
        (name = "Progress", description = "Student progress and course analytics"),
        (name = "Mentorship", description = "TA mentorship sessions"),
        (name = "Teaching Assistants", description = "TA assignment per course"),
        (name = "Industry Ratings", description = "Expert ratings of courses")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_bearer_scheme_and_paths() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(doc.paths.paths.contains_key("/api/v1/courses/{course_id}/enroll"));
        assert!(doc.paths.paths.contains_key("/api/v1/mentorship/{session_id}/rate"));
    }
}
