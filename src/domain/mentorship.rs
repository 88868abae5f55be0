//! Mentorship session lifecycle.
//!
//! `scheduled -> ongoing -> completed`, `scheduled -> completed`, and
//! `cancelled` from any non-terminal state.

use std::fmt;

use crate::entities::sea_orm_active_enums::SessionStatusEnum;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    Complete,
    Cancel,
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
        })
    }
}

pub fn transition(current: SessionStatusEnum, event: SessionEvent) -> AppResult<SessionStatusEnum> {
    use SessionStatusEnum::*;

    match (current, event) {
        (Scheduled, SessionEvent::Start) => Ok(Ongoing),
        (Scheduled | Ongoing, SessionEvent::Complete) => Ok(Completed),
        (Scheduled | Ongoing, SessionEvent::Cancel) => Ok(Cancelled),
        (from, event) => Err(AppError::Validation(format!(
            "Cannot {event} a {} session",
            from.as_str()
        ))),
    }
}

/// Maps a requested target status onto the event that reaches it.
pub fn event_for_target(target: SessionStatusEnum) -> AppResult<SessionEvent> {
    match target {
        SessionStatusEnum::Ongoing => Ok(SessionEvent::Start),
        SessionStatusEnum::Completed => Ok(SessionEvent::Complete),
        SessionStatusEnum::Cancelled => Ok(SessionEvent::Cancel),
        SessionStatusEnum::Scheduled => Err(AppError::Validation(
            "A session cannot move back to scheduled".to_string(),
        )),
    }
}

pub fn check_editable(status: SessionStatusEnum) -> AppResult<()> {
    if status.is_terminal() {
        return Err(AppError::Validation(format!(
            "A {} session cannot be edited",
            status.as_str()
        )));
    }
    Ok(())
}

pub fn check_rating(status: SessionStatusEnum, rating: i16) -> AppResult<()> {
    if status != SessionStatusEnum::Completed {
        return Err(AppError::Validation(
            "Only completed sessions can be rated".to_string(),
        ));
    }
    if !(1..=5).contains(&rating) {
        return Err(AppError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use SessionStatusEnum::*;

    #[test]
    fn test_forward_transitions() {
        assert_eq!(transition(Scheduled, SessionEvent::Start).unwrap(), Ongoing);
        assert_eq!(transition(Ongoing, SessionEvent::Complete).unwrap(), Completed);
        assert_eq!(transition(Scheduled, SessionEvent::Complete).unwrap(), Completed);
    }

    #[test]
    fn test_cancel_from_non_terminal_only() {
        assert_eq!(transition(Scheduled, SessionEvent::Cancel).unwrap(), Cancelled);
        assert_eq!(transition(Ongoing, SessionEvent::Cancel).unwrap(), Cancelled);
        assert!(transition(Completed, SessionEvent::Cancel).is_err());
        assert!(transition(Cancelled, SessionEvent::Cancel).is_err());
    }

    #[test]
    fn test_no_backward_transitions() {
        assert!(transition(Ongoing, SessionEvent::Start).is_err());
        assert!(transition(Completed, SessionEvent::Start).is_err());
        assert!(transition(Cancelled, SessionEvent::Complete).is_err());
        assert!(event_for_target(Scheduled).is_err());
    }

    #[test]
    fn test_rating_requires_completed() {
        assert!(check_rating(Scheduled, 5).is_err());
        assert!(check_rating(Ongoing, 5).is_err());
        assert!(check_rating(Cancelled, 5).is_err());
        assert!(check_rating(Completed, 5).is_ok());
    }

    #[test]
    fn test_rating_range() {
        assert!(check_rating(Completed, 0).is_err());
        assert!(check_rating(Completed, 6).is_err());
        assert!(check_rating(Completed, 1).is_ok());
    }

    #[test]
    fn test_terminal_sessions_are_read_only() {
        assert!(check_editable(Scheduled).is_ok());
        assert!(check_editable(Ongoing).is_ok());
        assert!(check_editable(Completed).is_err());
        assert!(check_editable(Cancelled).is_err());
    }
}
