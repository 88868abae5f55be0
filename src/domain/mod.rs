//! Pure course-platform rules. Nothing in here touches the database.

pub mod access;
pub mod availability;
pub mod mentorship;
pub mod ordering;
pub mod progress;
pub mod publish;
pub mod rating;
pub mod submission;
pub mod ta;

pub use access::{Action, Actor, Relationship, authorize};
