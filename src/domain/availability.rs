//! Free one-hour slots in a TA's working day.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::config::{AVAILABILITY_DAY_END_HOUR, AVAILABILITY_DAY_START_HOUR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Slot {
    pub fn new(start: NaiveDateTime, minutes: i64) -> Self {
        Self {
            start,
            end: start + Duration::minutes(minutes),
        }
    }

    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Hour-long slots of `date` between the working hours that do not overlap
/// any booked slot.
pub fn free_slots(date: NaiveDate, booked: &[Slot]) -> Vec<Slot> {
    (AVAILABILITY_DAY_START_HOUR..AVAILABILITY_DAY_END_HOUR)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .map(|start| Slot::new(start, 60))
        .filter(|slot| !booked.iter().any(|b| b.overlaps(slot)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_empty_day_has_all_slots() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let slots = free_slots(date, &[]);
        assert_eq!(
            slots.len(),
            (AVAILABILITY_DAY_END_HOUR - AVAILABILITY_DAY_START_HOUR) as usize
        );
        assert_eq!(slots[0].start, at(date, AVAILABILITY_DAY_START_HOUR, 0));
    }

    #[test]
    fn test_booked_sessions_block_overlapping_slots() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        // 10:30-11:15 touches both the 10:00 and 11:00 slots
        let booked = [Slot::new(at(date, 10, 30), 45)];
        let slots = free_slots(date, &booked);
        assert!(!slots.iter().any(|s| s.start == at(date, 10, 0)));
        assert!(!slots.iter().any(|s| s.start == at(date, 11, 0)));
        assert!(slots.iter().any(|s| s.start == at(date, 9, 0)));
        assert!(slots.iter().any(|s| s.start == at(date, 12, 0)));
    }

    #[test]
    fn test_adjacent_session_does_not_block() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let booked = [Slot::new(at(date, 9, 0), 60)];
        let slots = free_slots(date, &booked);
        assert!(!slots.iter().any(|s| s.start == at(date, 9, 0)));
        assert!(slots.iter().any(|s| s.start == at(date, 10, 0)));
    }
}
